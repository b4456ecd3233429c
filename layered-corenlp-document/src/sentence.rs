//! Sentences: tokens, parse string and dependency edges, each guarded by the
//! step that produces it.

use std::fmt;

use tracing::debug;

use layered_corenlp::annotators::{DEPPARSE, LEMMA, NER, PARSE, POS, SSPLIT, TOKENIZE};
use layered_corenlp::{nth, AccessError, Annotable, NodeId, Tree, TreeParser};

use crate::error::DocumentError;
use crate::governor::Governor;
use crate::hydrate::Annotated;
use crate::record::{DependencyRecord, DocumentRecord, SentenceRecord};
use crate::token::Token;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    annotable: Annotable,
    index: usize,
    tokens: Vec<Token>,
    parse: Option<String>,
    governors: Vec<Governor>,
    enhanced_dependencies: Option<Vec<DependencyRecord>>,
    enhanced_plus_plus_dependencies: Option<Vec<DependencyRecord>>,
}

impl Sentence {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            annotable: Annotable::new(text),
            ..Self::default()
        }
    }

    /// Build from a single sentence record.
    pub fn from_record(record: SentenceRecord) -> Result<Self, DocumentError> {
        let mut sentence = Self::default();
        sentence.hydrate_sentence(record)?;
        Ok(sentence)
    }

    /// Build from a whole-document response, using its first sentence.
    pub fn from_document_record(record: DocumentRecord) -> Result<Self, DocumentError> {
        let mut sentence = Self::default();
        sentence.hydrate(record)?;
        Ok(sentence)
    }

    /// Fill this sentence from a sentence record.
    pub fn hydrate_sentence(&mut self, record: SentenceRecord) -> Result<(), DocumentError> {
        self.index = record.index;

        if let Some(tokens) = record.tokens {
            self.tokens = tokens.into_iter().map(Token::from_record).collect();
            self.annotable.add_annotator(TOKENIZE);
            if self.tokens.iter().any(|token| token.pos().is_some()) {
                self.annotable.add_annotator(POS);
            }
            if self.tokens.iter().any(|token| token.lemma().is_some()) {
                self.annotable.add_annotator(LEMMA);
            }
            if self.tokens.iter().any(|token| token.ner().is_some()) {
                self.annotable.add_annotator(NER);
            }
        }

        if let Some(parse) = record.parse {
            self.parse = Some(parse);
            self.annotable.add_annotator(PARSE);
        }

        if let Some(edges) = record.basic_dependencies {
            self.governors = edges
                .iter()
                .map(|edge| Governor::from_record(edge, &self.tokens))
                .collect::<Result<_, _>>()?;
            self.annotable.add_annotator(DEPPARSE);
        }
        if record.enhanced_dependencies.is_some() {
            self.enhanced_dependencies = record.enhanced_dependencies;
        }
        if record.enhanced_plus_plus_dependencies.is_some() {
            self.enhanced_plus_plus_dependencies = record.enhanced_plus_plus_dependencies;
        }

        debug!(
            index = self.index,
            annotators = ?self.annotable.annotators().collect::<Vec<_>>(),
            "hydrated sentence"
        );

        Ok(())
    }

    pub fn to_record(&self) -> SentenceRecord {
        let has = |step: &str| self.annotable.has_annotator(step);
        SentenceRecord {
            index: self.index,
            tokens: if has(TOKENIZE) {
                Some(self.tokens.iter().map(Token::to_record).collect())
            } else {
                None
            },
            parse: self.parse.clone(),
            basic_dependencies: if has(DEPPARSE) {
                Some(self.governors.iter().map(Governor::to_record).collect())
            } else {
                None
            },
            enhanced_dependencies: self.enhanced_dependencies.clone(),
            enhanced_plus_plus_dependencies: self.enhanced_plus_plus_dependencies.clone(),
        }
    }

    /// 0-based position in the document.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn language(&self) -> Option<&str> {
        self.annotable.language()
    }

    pub fn tokens(&self) -> Result<&[Token], AccessError> {
        self.annotable.require(TOKENIZE, "tokens")?;
        Ok(&self.tokens)
    }

    pub fn token(&self, index: usize) -> Result<&Token, AccessError> {
        nth(self.tokens()?, index, "token")
    }

    pub fn words(&self) -> Result<Vec<&str>, AccessError> {
        Ok(self.tokens()?.iter().map(Token::word).collect())
    }

    pub fn word(&self, index: usize) -> Result<&str, AccessError> {
        Ok(self.token(index)?.word())
    }

    /// Tokens without a tag contribute an empty string.
    pub fn pos_tags(&self) -> Result<Vec<&str>, AccessError> {
        self.annotable.require(POS, "part-of-speech tags")?;
        Ok(self.column(Token::pos))
    }

    pub fn pos_tag(&self, index: usize) -> Result<&str, AccessError> {
        self.annotable.require(POS, "part-of-speech tag")?;
        Ok(nth(&self.tokens, index, "token")?.pos().unwrap_or(""))
    }

    pub fn lemmas(&self) -> Result<Vec<&str>, AccessError> {
        self.annotable.require(LEMMA, "lemmas")?;
        Ok(self.column(Token::lemma))
    }

    pub fn lemma(&self, index: usize) -> Result<&str, AccessError> {
        self.annotable.require(LEMMA, "lemma")?;
        Ok(nth(&self.tokens, index, "token")?.lemma().unwrap_or(""))
    }

    pub fn ner_tags(&self) -> Result<Vec<&str>, AccessError> {
        self.annotable.require(NER, "named-entity tags")?;
        Ok(self.column(Token::ner))
    }

    pub fn ner_tag(&self, index: usize) -> Result<&str, AccessError> {
        self.annotable.require(NER, "named-entity tag")?;
        Ok(nth(&self.tokens, index, "token")?.ner().unwrap_or(""))
    }

    fn column<'s>(&'s self, field: fn(&'s Token) -> Option<&'s str>) -> Vec<&'s str> {
        self.tokens
            .iter()
            .map(|token| field(token).unwrap_or(""))
            .collect()
    }

    /// The constituency parse in bracketed notation, as the engine sent it.
    pub fn parse_string(&self) -> Result<&str, AccessError> {
        self.annotable.require(PARSE, "parse")?;
        Ok(self.parse.as_deref().unwrap_or(""))
    }

    /// Build the constituency tree, with leaves bound to this sentence's
    /// tokens when the sentence is tokenized.
    pub fn tree(&self) -> Result<SentenceTree<'_>, DocumentError> {
        let mut tree = TreeParser::new()
            .with_double_link(true)
            .parse(self.parse_string()?)?;
        if self.annotable.has_annotator(TOKENIZE) {
            tree.bind_tokens(self.tokens.len())?;
        }
        Ok(SentenceTree {
            tree,
            sentence: self,
        })
    }

    pub fn governors(&self) -> Result<&[Governor], AccessError> {
        self.annotable.require(DEPPARSE, "governors")?;
        Ok(&self.governors)
    }

    pub fn governor(&self, index: usize) -> Result<&Governor, AccessError> {
        nth(self.governors()?, index, "governor")
    }

    /// Enhanced dependencies, kept as the engine sent them. `None` when the
    /// response had no such list, whether or not basic edges were present.
    pub fn enhanced_dependencies(&self) -> Option<&[DependencyRecord]> {
        self.enhanced_dependencies.as_deref()
    }

    pub fn enhanced_plus_plus_dependencies(&self) -> Option<&[DependencyRecord]> {
        self.enhanced_plus_plus_dependencies.as_deref()
    }

    pub(crate) fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

impl Annotated for Sentence {
    fn annotable(&self) -> &Annotable {
        &self.annotable
    }

    fn annotable_mut(&mut self) -> &mut Annotable {
        &mut self.annotable
    }

    /// Uses the first sentence of the response. A response without
    /// sentences leaves everything unmarked.
    fn hydrate(&mut self, record: DocumentRecord) -> Result<(), DocumentError> {
        if let Some(first) = record.sentences.and_then(|sentences| sentences.into_iter().next()) {
            self.annotable.add_annotator(SSPLIT);
            self.hydrate_sentence(first)?;
        }
        Ok(())
    }
}

/// Raw text when known, otherwise the words joined by spaces.
impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.annotable.text().is_empty() {
            return f.write_str(self.annotable.text());
        }
        for (position, token) in self.tokens.iter().enumerate() {
            if position > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// A constituency tree together with the sentence its leaves point into.
#[derive(Debug, Clone)]
pub struct SentenceTree<'s> {
    tree: Tree,
    sentence: &'s Sentence,
}

impl<'s> SentenceTree<'s> {
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    pub fn sentence(&self) -> &'s Sentence {
        self.sentence
    }

    /// Token bound to a leaf.
    pub fn token(&self, id: NodeId) -> Option<&'s Token> {
        let index = self.tree.get(id)?.token()?;
        self.sentence.tokens.get(index)
    }

    /// Bound tokens in leaf order.
    pub fn leaf_tokens(&self) -> Vec<&'s Token> {
        self.tree
            .leaves()
            .into_iter()
            .filter_map(|leaf| self.token(leaf))
            .collect()
    }
}
