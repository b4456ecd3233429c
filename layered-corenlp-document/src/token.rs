use std::fmt;

use layered_corenlp::{PosInfo, TagReference};

use crate::record::TokenRecord;

/// A word token with whatever per-token annotations the engine produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    index: usize,
    word: String,
    original_text: Option<String>,
    character_offset_begin: Option<usize>,
    character_offset_end: Option<usize>,
    before: Option<String>,
    after: Option<String>,
    pos: Option<String>,
    lemma: Option<String>,
    ner: Option<String>,
    speaker: Option<String>,
}

impl Token {
    /// A bare token, as built before any annotation.
    pub fn new(index: usize, word: impl Into<String>) -> Self {
        Self::from_record(TokenRecord {
            index,
            word: word.into(),
            ..TokenRecord::default()
        })
    }

    pub fn from_record(record: TokenRecord) -> Self {
        Self {
            index: record.index,
            word: record.word,
            original_text: record.original_text,
            character_offset_begin: record.character_offset_begin,
            character_offset_end: record.character_offset_end,
            before: record.before,
            after: record.after,
            pos: record.pos,
            lemma: record.lemma,
            ner: record.ner,
            speaker: record.speaker,
        }
    }

    pub fn to_record(&self) -> TokenRecord {
        TokenRecord {
            index: self.index,
            word: self.word.clone(),
            original_text: self.original_text.clone(),
            character_offset_begin: self.character_offset_begin,
            character_offset_end: self.character_offset_end,
            before: self.before.clone(),
            after: self.after.clone(),
            pos: self.pos.clone(),
            lemma: self.lemma.clone(),
            ner: self.ner.clone(),
            speaker: self.speaker.clone(),
        }
    }

    /// 1-based position in the sentence.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn original_text(&self) -> Option<&str> {
        self.original_text.as_deref()
    }

    /// Character span in the source text, when the tokenizer reported one.
    pub fn character_offsets(&self) -> Option<(usize, usize)> {
        Some((self.character_offset_begin?, self.character_offset_end?))
    }

    pub fn before(&self) -> Option<&str> {
        self.before.as_deref()
    }

    pub fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }

    pub fn pos(&self) -> Option<&str> {
        self.pos.as_deref()
    }

    pub fn lemma(&self) -> Option<&str> {
        self.lemma.as_deref()
    }

    pub fn ner(&self) -> Option<&str> {
        self.ner.as_deref()
    }

    pub fn speaker(&self) -> Option<&str> {
        self.speaker.as_deref()
    }

    pub fn pos_info<'r, R: TagReference>(&self, reference: &'r R, language: &str) -> Option<&'r PosInfo> {
        reference.pos_info(self.pos.as_deref()?, language)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.word)
    }
}
