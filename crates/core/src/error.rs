//! Error types shared by the selector, extractor, aggregator and query layers.

use std::path::PathBuf;
use thiserror::Error;

/// User-input mistakes. These are detected before any file is opened and are
/// reported back to the caller instead of aborting a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("unknown program(s): {}; expected one of: {}", .unknown.join(", "), .known.join(", "))]
    UnknownProgram {
        unknown: Vec<String>,
        known: Vec<String>,
    },
    #[error("unsupported language(s): {}; only English (\"en\") and Dutch (\"nl\") are allowed", .0.join(", "))]
    UnsupportedLanguage(Vec<String>),
    #[error("kind must be either \"token\" or \"type\", got {0:?}")]
    UnknownKind(String),
    #[error("entity type must be either \"person\" or \"place\", got {0:?}")]
    UnknownEntityType(String),
    #[error("rank must be a non-negative integer, got {0:?}")]
    InvalidRank(String),
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error("{path:?}: entity target {target:?} has no matching term")]
    UnresolvedTarget { path: PathBuf, target: String },

    #[error("{path:?}: <{element}> is missing required attribute {attribute:?}")]
    MissingAttribute {
        path: PathBuf,
        element: &'static str,
        attribute: &'static str,
    },

    #[error("cannot compute {quantity}: no documents selected")]
    EmptyCorpus { quantity: &'static str },

    #[error("cannot compute {quantity}: selected documents contain no word tokens")]
    NoWordTokens { quantity: &'static str },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML in {path:?}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("invalid corpus configuration: {0}")]
    Config(String),
}

impl CorpusError {
    /// True for errors caused by bad user input. Everything else signals a
    /// data-integrity or environment problem and must reach the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CorpusError::InvalidArgument(_))
    }

    /// True when the corpus itself violates the document schema.
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            CorpusError::UnresolvedTarget { .. } | CorpusError::MissingAttribute { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CorpusError>;
