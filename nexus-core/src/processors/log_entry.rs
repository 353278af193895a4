//! Log entry processor
//!
//! Accepts `LEVEL: message` text, with optional padding around the level.
//! Entries starting with exactly `ERROR` raise an alert; everything else is
//! informational and reports the level as written.

use core::str::FromStr;

use serde_json::Value;

use crate::errors::ProcessorError;
use crate::traits::DataProcessor;

/// Log levels a log entry may start with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Info,
    Warn,
    Debug,
    Log,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Debug => "DEBUG",
            LogLevel::Log => "LOG",
        }
    }

    /// Tag printed in front of the summary
    pub fn tag(self) -> &'static str {
        match self {
            LogLevel::Error => "[ALERT]",
            _ => "[INFO]",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ProcessorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ERROR" => Ok(LogLevel::Error),
            "INFO" => Ok(LogLevel::Info),
            "WARN" => Ok(LogLevel::Warn),
            "DEBUG" => Ok(LogLevel::Debug),
            "LOG" => Ok(LogLevel::Log),
            _ => Err(ProcessorError::UnknownLogLevel),
        }
    }
}

/// Classifies `LEVEL: message` entries
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProcessor;

impl LogProcessor {
    fn level(data: &Value) -> Result<LogLevel, ProcessorError> {
        let text = data.as_str().ok_or(ProcessorError::NotText)?;
        let head = text.split(':').next().unwrap_or_default();
        head.trim().parse()
    }
}

impl DataProcessor for LogProcessor {
    fn name(&self) -> &'static str {
        "LogProcessor"
    }

    fn check(&self, data: &Value) -> Result<(), ProcessorError> {
        Self::level(data).map(|_| ())
    }

    fn describe(&self, data: &Value) -> String {
        let mut parts = data.as_str().unwrap_or_default().split(':');
        let head = parts.next().unwrap_or_default();
        // Text between the first and second colon
        let message = parts.next().unwrap_or_default();

        // Padding is accepted by `check` but only an exact `ERROR` raises an alert
        let tag = head.parse::<LogLevel>().unwrap_or(LogLevel::Info).tag();
        format!("{tag} {head} level detected:{message}")
    }
}
