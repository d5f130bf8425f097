use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    prefix: Option<String>,
    verbose: AtomicBool,
}

impl Logger {
    fn new(prefix: Option<String>, verbose: bool) -> Self {
        Self {
            prefix,
            verbose: AtomicBool::new(verbose),
        }
    }

    fn format(&self, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        match self.prefix {
            Some(ref prefix) => format!("[{}][{}] {}", timestamp, prefix, message),
            None => format!("[{}] {}", timestamp, message),
        }
    }

    pub fn log(&self, message: &str) {
        println!("{}", self.format(message));
    }

    pub fn debug(&self, message: &str) {
        if self.verbose.load(Ordering::Relaxed) {
            println!("{}", self.format(message));
        }
    }
}

/// Installs the process-wide logger. Later calls keep the first logger.
pub fn init_logger(prefix: Option<String>, verbose: bool) {
    LOGGER.get_or_init(|| Logger::new(prefix, verbose));
}

pub fn set_verbose(verbose: bool) {
    if let Some(logger) = LOGGER.get() {
        logger.verbose.store(verbose, Ordering::Relaxed);
    }
}

pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    } else {
        eprintln!("Logger not initialized! Call init_logger() first.");
    }
}

pub fn debug(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.debug(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::logger::debug(&format!($($arg)*))
    };
}
