use rotalog::{Error, Level, Logger};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Console(Arc<Mutex<Vec<u8>>>);

impl Console {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn logger(threshold: Level) -> (Logger, Console) {
    let console = Console::default();
    (Logger::new(threshold).with_console(console.clone()), console)
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// `<stem>_<14 digits><ext>`
fn is_backup_name(name: &str, stem: &str, ext: &str) -> bool {
    name.strip_prefix(stem)
        .and_then(|rest| rest.strip_prefix('_'))
        .and_then(|rest| rest.strip_suffix(ext))
        .is_some_and(|stamp| stamp.len() == 14 && stamp.chars().all(|c| c.is_ascii_digit()))
}

#[test]
fn test_single_message_appended_to_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.log");
    let (mut logger, console) = logger(Level::Info);

    logger.attach_file(&path, 0o644, 1024).expect("attach");
    let line_no = line!() + 1;
    logger.info("hello file");

    let written = std::fs::read_to_string(&path).expect("read log file");
    assert_eq!(written.lines().count(), 1);
    let expected_tail = format!("] logger_file_tests.rs:{}: hello file\n", line_no);
    assert!(written.ends_with(&expected_tail), "{}", written);
    assert!(written.contains(" INFO] "));
    assert_eq!(written, console.contents());
}

#[test]
fn test_existing_content_is_preserved() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.log");
    std::fs::write(&path, "existing content\n").expect("seed");

    let (mut logger, _console) = logger(Level::Info);
    logger.attach_file(&path, 0o644, 1024).expect("attach");
    logger.warning("new content");

    let written = std::fs::read_to_string(&path).expect("read log file");
    assert!(written.starts_with("existing content\n"));
    assert!(written.contains("new content"));
}

#[test]
fn test_rotation_when_limit_reached() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.log");
    let (mut logger, _console) = logger(Level::Info);

    logger.attach_file(&path, 0o644, 50).expect("attach");
    logger.info("first message, long enough to pass fifty bytes");
    assert_eq!(file_names(dir.path()), ["app.log"]);

    logger.info("second message");

    let names = file_names(dir.path());
    assert_eq!(names.len(), 2, "{:?}", names);
    let backup = names
        .iter()
        .find(|name| name.as_str() != "app.log")
        .expect("backup file");
    assert!(is_backup_name(backup, "app", ".log"), "{}", backup);

    let rotated = std::fs::read_to_string(dir.path().join(backup)).expect("read backup");
    assert!(rotated.contains("first message"));
    assert!(!rotated.contains("second message"));

    let current = std::fs::read_to_string(&path).expect("read log file");
    assert_eq!(current.lines().count(), 1);
    assert!(current.contains("second message"));
    assert!(logger.has_file());
}

#[test]
fn test_rotation_without_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("service");
    let (mut logger, _console) = logger(Level::Info);

    logger.attach_file(&path, 0o644, 1).expect("attach");
    logger.info("one");
    logger.info("two");

    let names = file_names(dir.path());
    assert_eq!(names.len(), 2, "{:?}", names);
    assert!(names.contains(&"service".to_string()));
    assert!(
        names.iter().any(|name| is_backup_name(name, "service", "")),
        "{:?}",
        names
    );
}

#[test]
fn test_no_rotation_below_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.log");
    let (mut logger, _console) = logger(Level::Info);

    logger.attach_file(&path, 0o644, 1_000_000).expect("attach");
    logger.info("one");
    logger.info("two");
    logger.info("three");

    assert_eq!(file_names(dir.path()), ["app.log"]);
    let written = std::fs::read_to_string(&path).expect("read log file");
    assert_eq!(written.lines().count(), 3);
}

#[test]
fn test_close_file_reverts_to_console_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.log");
    let (mut logger, console) = logger(Level::Info);

    logger.attach_file(&path, 0o644, 1024).expect("attach");
    logger.info("before close");
    logger.close_file().expect("close");
    logger.info("after close");

    let written = std::fs::read_to_string(&path).expect("read log file");
    assert!(written.contains("before close"));
    assert!(!written.contains("after close"));
    assert_eq!(console.contents().lines().count(), 2);

    assert!(matches!(logger.close_file(), Err(Error::NoFileAttached)));
}

#[test]
fn test_attach_to_missing_directory_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("no").join("such").join("app.log");
    let (mut logger, _console) = logger(Level::Info);

    assert!(matches!(
        logger.attach_file(&path, 0o644, 1024),
        Err(Error::Io(_))
    ));
    assert!(!logger.has_file());
}

#[test]
fn test_shared_logger_behind_mutex() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.log");
    let (mut logger, _console) = logger(Level::Info);
    logger.attach_file(&path, 0o644, 1_000_000).expect("attach");

    let shared = Arc::new(Mutex::new(logger));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                for j in 0..10 {
                    shared.lock().unwrap().info(format_args!("thread {} line {}", i, j));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("join");
    }

    let written = std::fs::read_to_string(&path).expect("read log file");
    assert_eq!(written.lines().count(), 40);
    assert!(written.lines().all(|line| line.starts_with('[')));
}
