//! Size-triggered rotation.
//!
//! Attaches a log file with a tiny size limit, writes a burst of messages
//! and lists the files left behind.

use rotalog::Level;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    rotalog::init_diagnostics("debug")?;

    let temp_dir = tempfile::tempdir()?;
    let log_path = temp_dir.path().join("demo.log");

    let mut logger = rotalog::builder()
        .with_level("debug")
        .with_file(&log_path, 256)
        .build()?;

    for i in 0..10 {
        logger.log(Level::Info, format_args!("Log message number {}", i));
    }
    logger.debug("done writing");
    logger.close_file()?;

    // Backups share a one-second stamp, so a burst keeps only the latest.
    for entry in std::fs::read_dir(temp_dir.path())? {
        let entry = entry?;
        println!("{} ({} bytes)", entry.file_name().to_string_lossy(), entry.metadata()?.len());
    }

    Ok(())
}
