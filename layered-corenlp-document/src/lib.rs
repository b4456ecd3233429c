//! Document-level model for layered-corenlp.
//!
//! This crate turns the engine's JSON output into typed documents and
//! sentences whose accessors refuse to hand out data that was never
//! produced.
//!
//! ## Core Types
//!
//! - [`Document`] / [`Sentence`] / [`Token`] - Hydrated units of text
//! - [`Governor`] - Dependency edges between tokens
//! - [`CorefChain`] / [`CorefMention`] - Coreference, anchored to tokens
//! - [`SentenceTree`] - A constituency tree bound to its sentence's tokens
//! - [`Expression`] - TokensRegex, Semgrex and Tregex matches over a text
//! - [`PipelineConfig`] / [`Language`] - What to request, from TOML or
//!   `.properties`
//! - [`Connector`] / [`AnnotationService`] - The engine boundary
//!
//! ## Example
//!
//! ```
//! use layered_corenlp_document::{Document, DocumentRecord};
//!
//! let record: DocumentRecord = serde_json::from_str(r#"{
//!     "sentences": [{ "index": 0, "tokens": [{ "index": 1, "word": "Hi" }] }]
//! }"#).unwrap();
//!
//! let document = Document::from_record(record).unwrap();
//! assert_eq!(document.sentence(0).unwrap().words().unwrap(), vec!["Hi"]);
//! assert!(document.corefs().is_err());
//! ```

mod config;
mod connector;
mod coref;
mod document;
mod error;
mod expression;
mod governor;
mod hydrate;
mod record;
mod sentence;
mod service;
mod token;

// Model types
pub use coref::{Animacy, CorefChain, CorefMention, Gender, MentionType, Number};
pub use document::Document;
pub use expression::{Expression, ExpressionKind, ExpressionMatch, ExpressionSentence, MatchGroup};
pub use governor::Governor;
pub use hydrate::Annotated;
pub use sentence::{Sentence, SentenceTree};
pub use token::Token;

// Engine records
pub use record::{
    DependencyRecord, DocumentRecord, ExpressionRecord, MentionRecord, SentenceRecord, TokenRecord,
};

// Configuration and transport
pub use config::{Language, PipelineConfig};
pub use connector::{AnnotationRequest, Connector};
pub use service::AnnotationService;

pub use error::{ConfigError, ConnectorError, DocumentError, DocumentResult};

#[cfg(test)]
mod tests {
    mod fixtures;
    mod hydration;
    mod service;
}
