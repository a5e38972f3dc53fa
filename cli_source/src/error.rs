//! Error type shared by the flag configuration sources.

use thiserror::Error;

/// Errors that can occur while reading command-line flags as configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The operation is a permanent capability limit of the source, not a
    /// transient failure. Callers must not retry.
    #[error("{operation} is not supported by the {source_name} source")]
    Unsupported {
        /// Name of the source reporting the limit.
        source_name: &'static str,
        /// Operation that the source cannot perform.
        operation: &'static str,
    },

    /// A path segment expected to be a sub-mapping already holds a scalar
    /// value, or vice versa. The write is rejected rather than overwriting.
    #[error("key '{path}' conflicts while inserting '{key}': a key cannot hold both a value and a nested mapping")]
    KeyConflict {
        /// The existing key that blocked the write.
        path: String,
        /// The full delimited key that was being inserted.
        key: String,
    },

    /// The matches tree selected a subcommand that the command tree does not
    /// define. This indicates the matches were produced by a different
    /// command than the one supplied.
    #[error("command tree defines no subcommand named '{name}'")]
    UnknownCommand {
        /// Name of the subcommand reported by the matches tree.
        name: String,
    },

    /// Reading a flag's stored value from the matches failed.
    #[error("failed to read flag '{id}': {source}")]
    Matches {
        /// Identifier of the flag being read.
        id: String,
        /// Underlying error reported by the argument parser.
        #[source]
        source: clap::parser::MatchesError,
    },
}

impl SourceError {
    /// Construct an [`SourceError::Unsupported`] for the named operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use cli_source::SourceError;
    /// let err = SourceError::unsupported("command-line flags", "read_bytes");
    /// assert!(matches!(err, SourceError::Unsupported { .. }));
    /// ```
    #[must_use]
    pub const fn unsupported(source_name: &'static str, operation: &'static str) -> Self {
        Self::Unsupported {
            source_name,
            operation,
        }
    }

    /// Construct a [`SourceError::KeyConflict`] for the blocked path.
    #[must_use]
    pub fn key_conflict(path: impl Into<String>, key: impl Into<String>) -> Self {
        Self::KeyConflict {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Construct a [`SourceError::Matches`] wrapping a parser error.
    #[must_use]
    pub fn matches(id: impl Into<String>, source: clap::parser::MatchesError) -> Self {
        Self::Matches {
            id: id.into(),
            source,
        }
    }
}
