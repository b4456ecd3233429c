//! Documentary lookups for tags and labels.
//!
//! These are plain key lookups into static, per-language tables. A miss is
//! not an error: every lookup returns `Option`.
//!
//! [`ReferenceTables`] is a table-backed implementation that can be loaded
//! from RON:
//!
//! ```
//! use layered_corenlp::{ReferenceTables, TagReference};
//!
//! let tables = ReferenceTables::from_ron_str(r#"(
//!     languages: {
//!         "en": (
//!             tagset: { "NN": (group: "noun", tag: "NN", examples: ["cat"]) },
//!         ),
//!     },
//! )"#).unwrap();
//!
//! assert_eq!(tables.pos_info("NN", "en").unwrap().group, "noun");
//! assert!(tables.pos_info("NN", "fr").is_none());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ReferenceError;

/// Gloss for a part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosInfo {
    pub group: String,
    pub tag: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Gloss for a phrase label of a constituency tree (NP, VP, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseLabelInfo {
    pub description: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Gloss for a dependency relation label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Source of documentary tag/label information.
pub trait TagReference {
    fn pos_info(&self, tag: &str, language: &str) -> Option<&PosInfo>;

    fn parse_label_info(&self, label: &str, language: &str) -> Option<&ParseLabelInfo>;

    /// Dependency labels are universal, so no language is needed.
    fn dep_info(&self, label: &str) -> Option<&DepInfo>;
}

/// Per-language tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageTables {
    #[serde(default)]
    pub tagset: BTreeMap<String, PosInfo>,
    /// Phrase labels
    #[serde(default)]
    pub multiword: BTreeMap<String, ParseLabelInfo>,
}

/// In-memory reference tables keyed by ISO 639-1 language code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTables {
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageTables>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, DepInfo>,
}

impl ReferenceTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ron_str(source: &str) -> Result<Self, ReferenceError> {
        Ok(ron::from_str(source)?)
    }

    pub fn with_pos(mut self, language: &str, info: PosInfo) -> Self {
        self.languages
            .entry(language.to_string())
            .or_default()
            .tagset
            .insert(info.tag.clone(), info);
        self
    }

    pub fn with_parse_label(mut self, language: &str, label: &str, info: ParseLabelInfo) -> Self {
        self.languages
            .entry(language.to_string())
            .or_default()
            .multiword
            .insert(label.to_string(), info);
        self
    }

    pub fn with_dep(mut self, label: &str, info: DepInfo) -> Self {
        self.dependencies.insert(label.to_string(), info);
        self
    }
}

impl TagReference for ReferenceTables {
    fn pos_info(&self, tag: &str, language: &str) -> Option<&PosInfo> {
        self.languages.get(language)?.tagset.get(tag)
    }

    fn parse_label_info(&self, label: &str, language: &str) -> Option<&ParseLabelInfo> {
        self.languages.get(language)?.multiword.get(label)
    }

    fn dep_info(&self, label: &str) -> Option<&DepInfo> {
        self.dependencies.get(label)
    }
}
