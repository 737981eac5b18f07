use std::fs::OpenOptions;
use std::io::Write;
use std::panic::Location;
use std::path::Path;

use chrono::Local;

use super::fs::permissive;
use crate::error::{Error, Result};
use crate::platform::path::Layout;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Append one record to `<data>/log/<name>.log`.
///
/// The record reads `YYYY/MM/DD HH:MM:SS file.rs:LINE: text`, where the
/// location is the caller's. A newline is added unless `text` ends in one.
/// The log directory must already exist.
#[track_caller]
pub fn write_log(layout: &Layout, name: &str, text: &str) -> Result<()> {
    let caller = Location::caller();
    let path = layout.log_file(name);

    let mut file = permissive(OpenOptions::new().read(true).append(true).create(true))
        .open(&path)
        .map_err(|e| Error::open(&path, e))?;

    let record = format_record(&Local::now().format(TIMESTAMP_FORMAT).to_string(), caller, text);
    file.write_all(record.as_bytes()).map_err(|e| Error::io(&path, e))?;

    tracing::debug!("Appended log record to {}", path.display());
    Ok(())
}

fn format_record(timestamp: &str, caller: &Location<'_>, text: &str) -> String {
    let file = Path::new(caller.file())
        .file_name()
        .map(|f| f.to_string_lossy())
        .unwrap_or_else(|| caller.file().into());
    let mut record = format!("{timestamp} {file}:{}: {text}", caller.line());
    if !record.ends_with('\n') {
        record.push('\n');
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_with_log_dir() -> (tempfile::TempDir, Layout) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let layout = Layout::with_root(dir.path());
        std::fs::create_dir_all(layout.log_dir()).expect("failed to create log dir");
        (dir, layout)
    }

    #[test]
    fn format_record_uses_short_file_name() {
        let caller = Location::caller();
        let record = format_record("2024/01/02 03:04:05", caller, "started");
        assert_eq!(
            record,
            format!("2024/01/02 03:04:05 log.rs:{}: started\n", caller.line())
        );
    }

    #[test]
    fn format_record_keeps_single_trailing_newline() {
        let record = format_record("ts", Location::caller(), "done\n");
        assert!(record.ends_with("done\n"));
        assert!(!record.ends_with("\n\n"));
    }

    #[test]
    fn write_log_appends_records() -> anyhow::Result<()> {
        let (_dir, layout) = layout_with_log_dir();

        write_log(&layout, "app", "first")?;
        write_log(&layout, "app", "second")?;

        let content = std::fs::read_to_string(layout.log_file("app"))?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(": first"));
        assert!(lines[1].ends_with(": second"));
        assert!(lines[0].contains("log.rs:"));
        Ok(())
    }

    #[test]
    fn write_log_records_start_with_timestamp() -> anyhow::Result<()> {
        let (_dir, layout) = layout_with_log_dir();
        write_log(&layout, "app", "hello")?;

        let content = std::fs::read_to_string(layout.log_file("app"))?;
        let stamp: String = content.chars().take(19).collect();
        chrono::NaiveDateTime::parse_from_str(&stamp, TIMESTAMP_FORMAT)?;
        Ok(())
    }

    #[test]
    fn write_log_without_log_dir_is_open_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let layout = Layout::with_root(dir.path());

        let result = write_log(&layout, "app", "lost");
        assert!(matches!(result, Err(Error::Open { .. })));
        assert!(!layout.log_file("app").exists());
    }
}
