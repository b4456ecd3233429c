//! Pattern matches from the engine's expression utilities.
//!
//! An [`Expression`] pairs a text with a TokensRegex, Semgrex or Tregex
//! pattern. The engine answers with one [`ExpressionSentence`] per sentence,
//! each holding the [`ExpressionMatch`]es found there. A match exposes the
//! whole matched span plus one [`MatchGroup`] per named group (`$name` keys in
//! the response).

use std::convert::TryFrom;
use std::fmt;

use serde_json::{json, Map, Value};
use tracing::debug;

use layered_corenlp::annotators::{SEMGREX, TOKENSREGEX, TREGEX};
use layered_corenlp::{nth, AccessError, Annotable};

use crate::document::Document;
use crate::error::DocumentError;
use crate::record::{numeric_key, ExpressionRecord};
use crate::sentence::Sentence;
use crate::token::Token;

const LENGTH_KEY: &str = "length";
const GROUP_PREFIX: char = '$';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    TokensRegex,
    Semgrex,
    Tregex,
}

impl ExpressionKind {
    /// Endpoint name of the utility. It is also the prefix of the utility's
    /// options and the step marked on a matched expression.
    pub fn utility(self) -> &'static str {
        match self {
            ExpressionKind::TokensRegex => TOKENSREGEX,
            ExpressionKind::Semgrex => SEMGREX,
            ExpressionKind::Tregex => TREGEX,
        }
    }
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.utility())
    }
}

/// A matched span: the whole match, or one named group inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchGroup {
    label: Option<String>,
    text: Option<String>,
    begin: Option<usize>,
    end: Option<usize>,
    token: Option<Token>,
}

impl MatchGroup {
    fn from_object(label: Option<String>, object: &Map<String, Value>) -> Self {
        let offset = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_u64)
                .and_then(|value| usize::try_from(value).ok())
        };
        Self {
            label,
            text: object.get("text").and_then(Value::as_str).map(str::to_string),
            begin: offset("begin"),
            end: offset("end"),
            token: None,
        }
    }

    /// Group name without the `$`; `None` for the whole match.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// 0-based token offset of the first matched token.
    pub fn begin(&self) -> Option<usize> {
        self.begin
    }

    /// 0-based, exclusive.
    pub fn end(&self) -> Option<usize> {
        self.end
    }

    /// Sentence token this group starts at, once merged.
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    fn starts_at(&self, token: &Token) -> bool {
        self.begin.map(|begin| begin + 1) == Some(token.index())
            && self.text.as_deref() == Some(token.word())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionMatch {
    record: Map<String, Value>,
    /// The whole match first, then each named group in key order
    groups: Vec<MatchGroup>,
}

impl ExpressionMatch {
    /// Keys starting with `$` whose value is an object become named groups.
    pub fn from_record(record: Map<String, Value>) -> Self {
        let mut groups = vec![MatchGroup::from_object(None, &record)];
        for (key, value) in &record {
            if let (Some(label), Some(object)) = (key.strip_prefix(GROUP_PREFIX), value.as_object()) {
                groups.push(MatchGroup::from_object(Some(label.to_string()), object));
            }
        }
        Self { record, groups }
    }

    pub fn text(&self) -> Option<&str> {
        self.whole().text()
    }

    pub fn whole(&self) -> &MatchGroup {
        &self.groups[0]
    }

    /// The whole match followed by every named group.
    pub fn groups(&self) -> &[MatchGroup] {
        &self.groups
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups[1..].iter().filter_map(MatchGroup::label)
    }

    pub fn group(&self, label: &str) -> Option<&MatchGroup> {
        self.groups[1..]
            .iter()
            .find(|group| group.label() == Some(label))
    }

    /// Any raw field of the match, such as Tregex's `match` or `spanString`.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    pub fn to_record(&self) -> Map<String, Value> {
        self.record.clone()
    }
}

/// The matches found in one sentence, in numeric key order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionSentence {
    record: Map<String, Value>,
    matches: Vec<ExpressionMatch>,
}

impl ExpressionSentence {
    pub fn from_record(record: Map<String, Value>) -> Result<Self, DocumentError> {
        let mut keys: Vec<&String> = record.keys().filter(|key| *key != LENGTH_KEY).collect();
        keys.sort_by(|left, right| numeric_key(left).cmp(&numeric_key(right)));

        let matches = keys
            .into_iter()
            .map(|key| match &record[key] {
                Value::Object(object) => Ok(ExpressionMatch::from_record(object.clone())),
                _ => Err(DocumentError::MalformedMatch { key: key.clone() }),
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { record, matches })
    }

    pub fn matches(&self) -> &[ExpressionMatch] {
        &self.matches
    }

    pub fn match_at(&self, index: usize) -> Result<&ExpressionMatch, AccessError> {
        nth(&self.matches, index, "match")
    }

    /// Bind every group to the sentence token it starts at: the token whose
    /// 1-based index is `begin + 1` and whose word equals the group text.
    /// Groups without such a token keep their previous binding.
    pub fn merge_tokens_from_sentence(&mut self, sentence: &Sentence) -> Result<(), AccessError> {
        let tokens = sentence.tokens()?;
        for group in self
            .matches
            .iter_mut()
            .flat_map(|found| found.groups.iter_mut())
        {
            if let Some(token) = tokens.iter().find(|token| group.starts_at(token)) {
                group.token = Some(token.clone());
            }
        }
        Ok(())
    }

    pub fn to_record(&self) -> Map<String, Value> {
        self.record.clone()
    }
}

/// A text matched against one pattern by one utility.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    annotable: Annotable,
    kind: ExpressionKind,
    pattern: String,
    sentences: Vec<ExpressionSentence>,
}

impl Expression {
    pub fn new(text: impl Into<String>, pattern: impl Into<String>, kind: ExpressionKind) -> Self {
        Self {
            annotable: Annotable::new(text),
            kind,
            pattern: pattern.into(),
            sentences: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        self.annotable.text()
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn kind(&self) -> ExpressionKind {
        self.kind
    }

    pub fn language(&self) -> Option<&str> {
        self.annotable.language()
    }

    pub fn annotable(&self) -> &Annotable {
        &self.annotable
    }

    pub fn annotable_mut(&mut self) -> &mut Annotable {
        &mut self.annotable
    }

    /// Per-sentence matches. Guarded by the expression's utility.
    pub fn sentences(&self) -> Result<&[ExpressionSentence], AccessError> {
        self.annotable.require(self.kind.utility(), "expression matches")?;
        Ok(&self.sentences)
    }

    pub fn sentence(&self, index: usize) -> Result<&ExpressionSentence, AccessError> {
        nth(self.sentences()?, index, "expression sentence")
    }

    /// Fill from a utility response. A `sentences` field marks the utility.
    pub fn hydrate(&mut self, record: ExpressionRecord) -> Result<(), DocumentError> {
        if let Some(sentences) = record.sentences {
            self.sentences = sentences
                .into_iter()
                .map(ExpressionSentence::from_record)
                .collect::<Result<_, _>>()?;
            self.annotable.add_annotator(self.kind.utility());
        }

        debug!(
            utility = self.kind.utility(),
            sentences = self.sentences.len(),
            matches = self.sentences.iter().map(|sentence| sentence.matches.len()).sum::<usize>(),
            "hydrated expression"
        );

        Ok(())
    }

    /// Bind match groups to the tokens of an annotated document, pairing
    /// expression sentences with document sentences by position.
    pub fn merge_tokens_from_document(&mut self, document: &Document) -> Result<(), AccessError> {
        let sentences = document.sentences()?;
        for (matched, sentence) in self.sentences.iter_mut().zip(sentences) {
            matched.merge_tokens_from_sentence(sentence)?;
        }
        Ok(())
    }

    pub fn to_record(&self) -> ExpressionRecord {
        ExpressionRecord {
            sentences: if self.annotable.has_annotator(self.kind.utility()) {
                Some(self.sentences.iter().map(ExpressionSentence::to_record).collect())
            } else {
                None
            },
        }
    }

    /// `{ "text", "sentences" }` with each sentence as its list of matches.
    pub fn to_json(&self) -> Value {
        let sentences: Vec<Value> = self
            .sentences
            .iter()
            .map(|sentence| {
                Value::Array(
                    sentence
                        .matches
                        .iter()
                        .map(|found| Value::Object(found.to_record()))
                        .collect(),
                )
            })
            .collect();
        json!({
            "text": self.text(),
            "sentences": sentences,
        })
    }
}

/// The text, or when there is none, each sentence's matched texts.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.text().is_empty() {
            return f.write_str(self.text());
        }
        let sentences: Vec<String> = self
            .sentences
            .iter()
            .map(|sentence| {
                sentence
                    .matches
                    .iter()
                    .filter_map(ExpressionMatch::text)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        f.write_str(&sentences.join(". "))
    }
}
