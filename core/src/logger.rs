// Global boot log for LiveBoot
//
// Fixed capacity: the first entries of a boot are the ones worth reading,
// so once full, new entries are only counted.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use spin::Mutex;

#[doc(hidden)]
pub use alloc::format as __format;

const MAX_LOG_ENTRIES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERR ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub message: Cow<'static, str>,
}

static LOG_BUFFER: Mutex<Vec<LogEntry>> = Mutex::new(Vec::new());
static DROPPED: AtomicUsize = AtomicUsize::new(0);

pub fn log(level: Level, message: impl Into<Cow<'static, str>>) {
    let entry = LogEntry {
        level,
        message: message.into(),
    };
    push_bounded(&mut LOG_BUFFER.lock(), &DROPPED, MAX_LOG_ENTRIES, entry);
}

/// Keep `entry` if `buffer` has room, otherwise count it in `dropped`.
fn push_bounded(
    buffer: &mut Vec<LogEntry>,
    dropped: &AtomicUsize,
    capacity: usize,
    entry: LogEntry,
) {
    if buffer.len() < capacity {
        buffer.push(entry);
    } else {
        dropped.fetch_add(1, Ordering::Relaxed);
    }
}

pub fn get_logs() -> Vec<LogEntry> {
    LOG_BUFFER.lock().clone()
}

pub fn log_count() -> usize {
    LOG_BUFFER.lock().len()
}

pub fn dropped_count() -> usize {
    DROPPED.load(Ordering::Relaxed)
}

pub const fn capacity() -> usize {
    MAX_LOG_ENTRIES
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::Level::Info, $crate::logger::__format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::Level::Warn, $crate::logger::__format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::Level::Error, $crate::logger::__format!($($arg)*))
    };
}
