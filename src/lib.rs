#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Client-side model layer for a CoreNLP-style annotation engine.
//!
//! The engine does the linguistic work. This crate describes which steps to
//! request and rebuilds navigable structures from what comes back:
//!
//! - [`Annotator`] / [`Pipeline`] - Configurable steps with prerequisites,
//!   flattened into the ordered, de-duplicated step list the engine runs
//! - [`annotators`] - The engine's stock steps with default options
//! - [`Annotable`] - Which steps have been satisfied for a unit of text
//! - [`Tree`] / [`TreeParser`] - Constituency trees from bracketed notation
//! - [`TagReference`] - Documentary glosses for tags and labels
//!
//! ## Example
//!
//! ```
//! use layered_corenlp::{annotators, Pipeline, Tree};
//!
//! let pipeline = Pipeline::compile(&annotators::parse(Vec::new())).unwrap();
//! assert_eq!(pipeline.annotators_property(), "tokenize,ssplit,parse");
//!
//! let mut tree = Tree::parse("(ROOT (S (NP (NNP John)) (VP (VBZ runs))))").unwrap();
//! tree.bind_tokens(2).unwrap();
//! assert_eq!(tree.leaves().len(), 2);
//! ```

mod annotable;
mod annotator;
pub mod annotators;
mod error;
mod pipeline;
mod reference;
mod tree;

pub use annotable::{nth, Annotable};
pub use annotator::{Annotator, OptionValue, Step};
pub use error::{AccessError, PipelineError, ReferenceError, TreeError};
pub use pipeline::Pipeline;
pub use reference::{
    DepInfo, LanguageTables, ParseLabelInfo, PosInfo, ReferenceTables, TagReference,
};
pub use tree::{Node, NodeId, NodeInfo, Tree, TreeParser};
