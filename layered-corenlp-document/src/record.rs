//! Serde mirrors of the engine's JSON output.
//!
//! Field names follow the engine (camelCase). Every field family that a step
//! may or may not produce is optional, so "absent" and "empty" stay distinct.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coref::{Animacy, Gender, MentionType, Number};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentences: Option<Vec<SentenceRecord>>,
    /// Chains keyed by the engine's chain id. Map order is string order;
    /// hydration reorders chains by numeric id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corefs: Option<BTreeMap<String, Vec<MentionRecord>>>,
}

/// Sort key for engine object keys that are numbers written as strings.
///
/// Numeric keys come first in numeric order; any other key sorts after
/// them in string order, so `"2"` precedes `"10"`.
pub(crate) fn numeric_key(key: &str) -> (bool, u64, &str) {
    match key.parse::<u64>() {
        Ok(number) => (false, number, key),
        Err(_) => (true, 0, key),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceRecord {
    #[serde(default)]
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<TokenRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_dependencies: Option<Vec<DependencyRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_dependencies: Option<Vec<DependencyRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_plus_plus_dependencies: Option<Vec<DependencyRecord>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    /// 1-based position in the sentence
    pub index: usize,
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_offset_begin: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_offset_end: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

/// One dependency edge. Index 0 for `governor` means ROOT.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRecord {
    pub dep: String,
    pub governor: usize,
    #[serde(default)]
    pub governor_gloss: String,
    pub dependent: usize,
    #[serde(default)]
    pub dependent_gloss: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionRecord {
    pub id: usize,
    pub text: String,
    #[serde(rename = "type", default)]
    pub mention_type: MentionType,
    #[serde(default)]
    pub number: Number,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub animacy: Animacy,
    /// 1-based token index of the first token
    pub start_index: usize,
    /// 1-based, exclusive
    pub end_index: usize,
    pub head_index: usize,
    /// 1-based sentence number
    pub sent_num: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub position: Vec<usize>,
    #[serde(default)]
    pub is_representative_mention: bool,
}

/// Response of a pattern-matching utility.
///
/// Each sentence is an object of matches keyed `"0"`, `"1"`, ... plus a
/// `length` count. Match objects are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpressionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentences: Option<Vec<Map<String, Value>>>,
}
