//! Console Logger
//!
//! `log` backend for the browser: each record becomes one line on the
//! matching `console` method, prefixed with a UTC timestamp.

use chrono::{NaiveTime, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use wasm_bindgen::JsValue;

struct ConsoleLogger {
    level: LevelFilter,
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(Utc::now().time(), record.level(), record.target(), &record.args().to_string());
        let line = JsValue::from_str(&line);
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger as the global `log` backend.
/// Fails if another logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(ConsoleLogger { level }))?;
    log::set_max_level(level);
    Ok(())
}

/// `HH:MM:SS.mmm [LEVEL target] message`
pub fn format_line(time: NaiveTime, level: Level, target: &str, message: &str) -> String {
    format!("{} [{:<5} {}] {}", time.format("%H:%M:%S%.3f"), level, target, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_carries_time_level_and_target() {
        let time = NaiveTime::from_hms_milli_opt(9, 5, 7, 42).unwrap();
        assert_eq!(
            format_line(time, Level::Warn, "planner_core::txn", "Rolled back edit on 2025-01-07"),
            "09:05:07.042 [WARN  planner_core::txn] Rolled back edit on 2025-01-07"
        );
    }

    #[test]
    fn filter_respects_configured_level() {
        let logger = ConsoleLogger { level: LevelFilter::Info };
        let debug = Metadata::builder().level(Level::Debug).target("t").build();
        let error = Metadata::builder().level(Level::Error).target("t").build();
        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&error));
    }
}
