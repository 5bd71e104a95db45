use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while extracting series names.
#[derive(Debug, Error)]
pub enum ShowlistError {
    /// The input file could not be opened or read.
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// No consistent delimiter could be inferred from the sample.
    #[error("could not determine delimiter: {reason}")]
    DialectDetection {
        /// Why the sniffer gave up.
        reason: String,
    },

    /// A record could not be parsed with the sniffed dialect.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// The output file could not be written.
    #[error("failed to write {path:?}: {source}")]
    Output {
        /// The file that was being written.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for showlist operations.
pub type Result<T> = std::result::Result<T, ShowlistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ShowlistError::DialectDetection {
            reason: "no candidate delimiter".into(),
        };
        assert_eq!(
            err.to_string(),
            "could not determine delimiter: no candidate delimiter"
        );

        let err = ShowlistError::Io {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ShowlistError>();
    }
}
