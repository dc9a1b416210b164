//! Log level definitions
//!
//! Levels form a strict total order `debug < info < warn < error < fatal`.
//! Names are resolved case-insensitively; numbers map to the same ordinal.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }

    #[inline]
    pub fn as_number(&self) -> u8 {
        *self as u8
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Cyan,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            _ => Err(LoggerError::invalid_level(format!("{:?}", s))),
        }
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = LoggerError;

    fn try_from(value: u8) -> Result<Self> {
        LogLevel::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| LoggerError::invalid_level(value.to_string()))
    }
}

/// Anything that can be resolved to a [`LogLevel`]: the level itself, a
/// level name, or a level number.
pub trait ToLevel {
    fn to_level(&self) -> Result<LogLevel>;
}

impl ToLevel for LogLevel {
    fn to_level(&self) -> Result<LogLevel> {
        Ok(*self)
    }
}

impl ToLevel for &str {
    fn to_level(&self) -> Result<LogLevel> {
        self.parse()
    }
}

impl ToLevel for String {
    fn to_level(&self) -> Result<LogLevel> {
        self.parse()
    }
}

impl ToLevel for u8 {
    fn to_level(&self) -> Result<LogLevel> {
        LogLevel::try_from(*self)
    }
}

impl ToLevel for i32 {
    fn to_level(&self) -> Result<LogLevel> {
        u8::try_from(*self)
            .map_err(|_| LoggerError::invalid_level(self.to_string()))
            .and_then(LogLevel::try_from)
    }
}

impl ToLevel for usize {
    fn to_level(&self) -> Result<LogLevel> {
        u8::try_from(*self)
            .map_err(|_| LoggerError::invalid_level(self.to_string()))
            .and_then(LogLevel::try_from)
    }
}

/// Compare two levels by their numeric rank.
///
/// Fails with [`LoggerError::InvalidLevel`] when either side does not name a level.
pub fn compare_levels<L, R>(left: L, right: R) -> Result<Ordering>
where
    L: ToLevel,
    R: ToLevel,
{
    let left = left.to_level()?;
    let right = right.to_level()?;
    Ok(left.as_number().cmp(&right.as_number()))
}

/// Whether an event at `level` passes a handler whose threshold is `threshold`.
pub fn log_allowed<T, L>(threshold: T, level: L) -> Result<bool>
where
    T: ToLevel,
    L: ToLevel,
{
    Ok(compare_levels(threshold, level)? != Ordering::Greater)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_names_equal() {
        assert_eq!(compare_levels("info", "info").unwrap(), Ordering::Equal);
        assert_eq!(compare_levels("INFO", "INFO").unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_compare_numbers() {
        assert_eq!(compare_levels(1u8, 1u8).unwrap(), Ordering::Equal);
        assert_eq!(compare_levels(0u8, 2u8).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_compare_mixed() {
        assert_eq!(compare_levels("debug", "warn").unwrap(), Ordering::Less);
        assert_eq!(compare_levels(LogLevel::Error, "info").unwrap(), Ordering::Greater);
        assert_eq!(compare_levels(3i32, LogLevel::Error).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_unknown_level_fails() {
        let err = compare_levels("verbose", "info").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));

        assert!(compare_levels(LogLevel::Info, 9u8).is_err());
        assert!(compare_levels(-1i32, LogLevel::Info).is_err());
    }

    #[test]
    fn test_log_allowed() {
        assert!(!log_allowed(LogLevel::Warn, LogLevel::Debug).unwrap());
        assert!(log_allowed(LogLevel::Info, LogLevel::Error).unwrap());
        assert!(log_allowed("info", "info").unwrap());
    }

    #[test]
    fn test_display_and_parse() {
        for level in LogLevel::ALL {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
        assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
