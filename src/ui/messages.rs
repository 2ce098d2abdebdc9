//! Transient banners printed to the terminal.
//!
//! Every recoverable failure of a form operation ends up here: the command
//! returns to the shell with a readable message instead of a panic.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Level::Info => ("\x1b[34m", "ℹ️"),
            Level::Success => ("\x1b[32m", "✔"),
            Level::Warning => ("\x1b[33m", "⚠️"),
            Level::Error => ("\x1b[31m", "❌"),
        }
    }
}

/// Print a banner; errors go to stderr, everything else to stdout.
pub fn banner<T: fmt::Display>(level: Level, msg: T) {
    let (color, icon) = level.style();
    let line = format!("{color}{BOLD}{icon} {RESET}{msg}");
    if level == Level::Error {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    banner(Level::Info, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    banner(Level::Success, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    banner(Level::Warning, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    banner(Level::Error, msg);
}

/// Section header used by `show` and `draft show`.
pub fn header<T: fmt::Display>(msg: T) {
    println!("\x1b[34m{BOLD}====================== {msg}\n{RESET}");
}
