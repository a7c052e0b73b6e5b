#![forbid(unsafe_code)]

//! Error type shared by every treelog crate.

use std::io;

/// Errors surfaced by treelog.
///
/// Most rendering problems are not errors at all: suppressed writes are
/// silent and malformed UTF-8 is passed through. What remains are stack
/// imbalances (fatal for the level stack) and configuration parse failures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A level/mask pop had no matching push.
    #[error("wrong message stack balance: pop without a matching push")]
    LevelUnderflow,
    /// The root scope was asked to close.
    #[error("scope stack underflow: the root scope cannot be closed")]
    ScopeUnderflow,
    /// Unrecognized log level name.
    #[error("unknown log level `{0}`")]
    InvalidLevel(String),
    /// Message mask that is neither decimal nor `0x` hexadecimal.
    #[error("invalid message mask `{0}`")]
    InvalidMask(String),
    /// Unrecognized color mode.
    #[error("unknown color mode `{0}` (expected auto, always or never)")]
    InvalidColorMode(String),
    /// Unrecognized width metric.
    #[error("unknown width metric `{0}` (expected codepoints or cells)")]
    InvalidMetric(String),
    /// Timestamp pattern chrono cannot format.
    #[error("invalid timestamp format `{0}`")]
    InvalidStampFormat(String),
    /// Fallback width that is not a positive integer.
    #[error("invalid fallback width `{0}`")]
    InvalidWidth(String),
    /// I/O failure while writing to a sink.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Standard result type for treelog APIs.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underflow_message_names_the_balance_problem() {
        assert!(
            Error::LevelUnderflow
                .to_string()
                .contains("wrong message stack balance")
        );
    }

    #[test]
    fn io_errors_convert() {
        let err: Error = io::Error::other("closed").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "closed");
    }

    #[test]
    fn parse_errors_quote_the_input() {
        assert_eq!(
            Error::InvalidLevel("loud".into()).to_string(),
            "unknown log level `loud`"
        );
    }
}
