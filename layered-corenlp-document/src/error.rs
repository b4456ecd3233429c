//! Error types for hydration, configuration and engine calls.

use std::path::PathBuf;

use thiserror::Error;

use layered_corenlp::{AccessError, PipelineError, TreeError};

/// Errors raised while turning engine output into documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The response did not match the expected record shape.
    #[error("malformed engine response: {0}")]
    MalformedRecord(#[from] serde_json::Error),

    /// A dependency edge refers to a token the sentence does not have.
    #[error("dependency `{dep}` refers to token {index}, but the sentence has {len} tokens")]
    DependencyOutOfRange {
        dep: String,
        index: usize,
        len: usize,
    },

    /// A coreference mention points outside the hydrated sentences or tokens.
    #[error("coreference mention {id} points at sentence {sent_num}, token {start_index}, which does not exist")]
    MentionOutOfRange {
        id: usize,
        sent_num: usize,
        start_index: usize,
    },

    /// An expression match entry that is not a JSON object.
    #[error("expression match `{key}` is not an object")]
    MalformedMatch { key: String },

    #[error(transparent)]
    Connector(#[from] ConnectorError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectorError {
    /// The engine could not be reached or the call did not complete.
    #[error("engine call failed: {0}")]
    Transport(String),

    /// The engine answered with a failure status.
    #[error("engine returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Errors raised while loading pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse pipeline config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A `.properties` line that is neither blank, a comment, nor `key = value`.
    #[error("properties line {line}: {message}")]
    Properties { line: usize, message: String },

    #[error("unknown language `{0}`")]
    UnknownLanguage(String),
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
