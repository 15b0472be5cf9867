//! Call-site capture.
//!
//! Every emitted line names the source file and line that requested it. The
//! logging methods are `#[track_caller]`, so the compiler hands us the
//! caller's [`Location`]; a [`CallSiteProvider`] turns that into the
//! printable [`CallSite`]. Providers can be swapped out, which lets tests
//! pin the location or simulate a capture failure.

use std::fmt;
use std::panic::Location;
use std::path::Path;

/// Source location printed in a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Base name of the source file, without directories.
    pub file: String,
    /// Line number within `file`.
    pub line: u32,
}

impl CallSite {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Resolves the caller of a logging method into a [`CallSite`].
///
/// Returning `None` suppresses the whole emission: no stdout line and no
/// file write.
pub trait CallSiteProvider {
    fn resolve(&self, caller: &'static Location<'static>) -> Option<CallSite>;
}

impl<F> CallSiteProvider for F
where
    F: Fn(&'static Location<'static>) -> Option<CallSite>,
{
    fn resolve(&self, caller: &'static Location<'static>) -> Option<CallSite> {
        self(caller)
    }
}

/// Default provider: the compiler-tracked caller location, reduced to the
/// file's base name.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackCaller;

impl CallSiteProvider for TrackCaller {
    fn resolve(&self, caller: &'static Location<'static>) -> Option<CallSite> {
        let file = Path::new(caller.file()).file_name()?.to_str()?;
        Some(CallSite::new(file, caller.line()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_caller_strips_directories() {
        let here = Location::caller();
        let site = TrackCaller.resolve(here).expect("call site");
        assert_eq!(site.file, "callsite.rs");
        assert_eq!(site.line, here.line());
    }

    #[test]
    fn test_closure_provider() {
        let fixed = |_: &'static Location<'static>| Some(CallSite::new("main.rs", 7));
        let site = fixed.resolve(Location::caller()).unwrap();
        assert_eq!(site.to_string(), "main.rs:7");

        let unavailable = |_: &'static Location<'static>| -> Option<CallSite> { None };
        assert!(unavailable.resolve(Location::caller()).is_none());
    }
}
