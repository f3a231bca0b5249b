//! Admin PIN type.
//!
//! The kiosk has a single shared admin PIN. It is compared in constant time
//! and never shows up in `Debug` output.

use thiserror::Error;

/// Shortest PIN accepted when setting a new one.
pub const MIN_PIN_LENGTH: usize = 4;

/// Why a new PIN was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PinError {
    #[error("PIN must be at least {MIN_PIN_LENGTH} digits")]
    TooShort,
    /// The PIN is persisted as a single `KEY=value` line.
    #[error("PIN must not contain control characters")]
    ControlCharacter,
}

/// A PIN that passed validation for use as the new admin credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    /// Validate a candidate PIN.
    ///
    /// # Errors
    ///
    /// Returns `PinError::TooShort` for fewer than [`MIN_PIN_LENGTH`]
    /// characters, `PinError::ControlCharacter` if it contains a newline or
    /// other control character.
    pub fn parse(candidate: &str) -> Result<Self, PinError> {
        if candidate.chars().count() < MIN_PIN_LENGTH {
            return Err(PinError::TooShort);
        }
        if candidate.chars().any(char::is_control) {
            return Err(PinError::ControlCharacter);
        }
        Ok(Self(candidate.to_owned()))
    }

    /// Get the PIN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for Pin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Pin([REDACTED])")
    }
}

/// Constant-time byte comparison.
///
/// The running time depends only on the lengths of the inputs, not on where
/// they first differ.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_four_or_more() {
        assert!(Pin::parse("1234").is_ok());
        assert!(Pin::parse("000111").is_ok());
    }

    #[test]
    fn test_parse_rejects_short() {
        assert_eq!(Pin::parse("123"), Err(PinError::TooShort));
        assert_eq!(Pin::parse(""), Err(PinError::TooShort));
    }

    #[test]
    fn test_parse_rejects_newline() {
        assert_eq!(Pin::parse("1234\nFOO=bar"), Err(PinError::ControlCharacter));
    }

    #[test]
    fn test_too_short_message() {
        assert_eq!(PinError::TooShort.to_string(), "PIN must be at least 4 digits");
    }

    #[test]
    fn test_debug_redacts() {
        let pin = Pin::parse("987654").unwrap_or_else(|_| unreachable!());
        let debug = format!("{pin:?}");
        assert!(!debug.contains("987654"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"000111", b"000111"));
        assert!(constant_time_eq(b"", b""));
        assert!(!constant_time_eq(b"000111", b"000112"));
        assert!(!constant_time_eq(b"000111", b"00011"));
        assert!(!constant_time_eq(b"0001", b"00011"));
    }
}
