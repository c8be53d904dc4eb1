//! Kernel-`printk`-style diagnostic logging.
//!
//! No `log`/`tracing` facade is introduced here — this mirrors the
//! workspace's existing hand-rolled diagnostic macros rather than
//! reaching for an external crate the rest of the codebase doesn't use.
//!
//! # Environment variables
//!
//! - `ORDSCHED_LOG_LEVEL` — `0`=off, `1`=error, `2`=warn, `3`=info,
//!   `4`=debug, `5`=trace. Defaults to `info`.
//! - `ORDSCHED_LOG_TIME` — include a nanosecond-since-init timestamp.
//!
//! # Output format
//!
//! `[LEVEL] [w<worker>] message`, or `[LEVEL] [<ns>] [w<worker>] message`
//! with timestamps enabled. `w--` denotes a message logged from outside
//! any worker thread (the feeder, the scheduler, the consumer).

use crate::env::{env_get, env_get_bool};
use std::cell::Cell;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => LogLevel::Off,
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Off => "",
            LogLevel::Error => "[ERROR]",
            LogLevel::Warn => "[WARN] ",
            LogLevel::Info => "[INFO] ",
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Trace => "[TRACE]",
        }
    }
}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
static TIME_ENABLED: AtomicBool = AtomicBool::new(false);
static INITIALIZED: AtomicBool = AtomicBool::new(false);
static START_TIME: OnceLock<Instant> = OnceLock::new();

thread_local! {
    static CURRENT_WORKER: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Initialize logging from environment variables. Idempotent; called
/// automatically by the first log statement, but may be called
/// explicitly for deterministic setup.
pub fn init() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }
    let raw: u8 = env_get("ORDSCHED_LOG_LEVEL", LogLevel::Info as u8);
    LOG_LEVEL.store(LogLevel::from_u8(raw) as u8, Ordering::Relaxed);
    TIME_ENABLED.store(env_get_bool("ORDSCHED_LOG_TIME", false), Ordering::Relaxed);
    START_TIME.get_or_init(Instant::now);
}

pub fn set_log_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Tag the current thread as running a given worker, for the `w<id>`
/// field in subsequent log lines on this thread.
pub fn set_current_worker(id: Option<u64>) {
    CURRENT_WORKER.with(|cell| cell.set(id));
}

#[doc(hidden)]
pub fn enabled(level: LogLevel) -> bool {
    init();
    level as u8 <= LOG_LEVEL.load(Ordering::Relaxed)
}

#[doc(hidden)]
pub fn emit(level: LogLevel, args: std::fmt::Arguments<'_>) {
    let worker = CURRENT_WORKER.with(|cell| cell.get());
    let worker_tag = match worker {
        Some(id) => format!("w{id}"),
        None => "w--".to_string(),
    };

    let mut line = String::new();
    if TIME_ENABLED.load(Ordering::Relaxed) {
        let elapsed = START_TIME.get_or_init(Instant::now).elapsed().as_nanos();
        line.push_str(&format!("{} [{elapsed}] [{worker_tag}] {args}", level.prefix()));
    } else {
        line.push_str(&format!("{} [{worker_tag}] {args}", level.prefix()));
    }
    let _ = writeln!(std::io::stderr(), "{line}");
}

#[macro_export]
macro_rules! qerror {
    ($($arg:tt)*) => {
        if $crate::qlog::enabled($crate::qlog::LogLevel::Error) {
            $crate::qlog::emit($crate::qlog::LogLevel::Error, format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! qwarn {
    ($($arg:tt)*) => {
        if $crate::qlog::enabled($crate::qlog::LogLevel::Warn) {
            $crate::qlog::emit($crate::qlog::LogLevel::Warn, format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! qinfo {
    ($($arg:tt)*) => {
        if $crate::qlog::enabled($crate::qlog::LogLevel::Info) {
            $crate::qlog::emit($crate::qlog::LogLevel::Info, format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! qdebug {
    ($($arg:tt)*) => {
        if $crate::qlog::enabled($crate::qlog::LogLevel::Debug) {
            $crate::qlog::emit($crate::qlog::LogLevel::Debug, format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! qtrace {
    ($($arg:tt)*) => {
        if $crate::qlog::enabled($crate::qlog::LogLevel::Trace) {
            $crate::qlog::emit($crate::qlog::LogLevel::Trace, format_args!($($arg)*));
        }
    };
}
