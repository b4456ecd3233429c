//! Dependency edges between tokens of one sentence.

use std::fmt;

use layered_corenlp::{DepInfo, TagReference};

use crate::error::DocumentError;
use crate::record::DependencyRecord;
use crate::token::Token;

const ROOT_GLOSS: &str = "ROOT";

/// A labeled edge from a governor token to a dependent token.
///
/// The edge whose governor is the virtual ROOT has no governor token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Governor {
    dep: String,
    governor: Option<Token>,
    dependent: Token,
}

impl Governor {
    pub fn new(dep: impl Into<String>, governor: Option<Token>, dependent: Token) -> Self {
        Self {
            dep: dep.into(),
            governor,
            dependent,
        }
    }

    /// Resolve a record's 1-based indices against the sentence tokens.
    pub fn from_record(record: &DependencyRecord, tokens: &[Token]) -> Result<Self, DocumentError> {
        let resolve = |index: usize| {
            index
                .checked_sub(1)
                .and_then(|position| tokens.get(position))
                .cloned()
                .ok_or_else(|| DocumentError::DependencyOutOfRange {
                    dep: record.dep.clone(),
                    index,
                    len: tokens.len(),
                })
        };

        let governor = match record.governor {
            0 => None,
            index => Some(resolve(index)?),
        };
        let dependent = resolve(record.dependent)?;

        Ok(Self::new(record.dep.clone(), governor, dependent))
    }

    pub fn dep(&self) -> &str {
        &self.dep
    }

    /// `None` for the edge coming from ROOT.
    pub fn governor(&self) -> Option<&Token> {
        self.governor.as_ref()
    }

    pub fn dependent(&self) -> &Token {
        &self.dependent
    }

    pub fn is_root(&self) -> bool {
        self.governor.is_none()
    }

    /// Governor word, or an empty string for ROOT.
    pub fn governor_gloss(&self) -> &str {
        self.governor.as_ref().map(Token::word).unwrap_or("")
    }

    pub fn dependent_gloss(&self) -> &str {
        self.dependent.word()
    }

    pub fn dep_info<'r, R: TagReference>(&self, reference: &'r R) -> Option<&'r DepInfo> {
        reference.dep_info(&self.dep)
    }

    pub fn to_record(&self) -> DependencyRecord {
        DependencyRecord {
            dep: self.dep.clone(),
            governor: self.governor.as_ref().map(Token::index).unwrap_or(0),
            governor_gloss: self
                .governor
                .as_ref()
                .map(|token| token.word().to_string())
                .unwrap_or_else(|| ROOT_GLOSS.to_string()),
            dependent: self.dependent.index(),
            dependent_gloss: self.dependent.word().to_string(),
        }
    }
}

impl fmt::Display for Governor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> Vec<Token> {
        vec![Token::new(1, "John"), Token::new(2, "runs")]
    }

    fn edge(dep: &str, governor: usize, dependent: usize) -> DependencyRecord {
        DependencyRecord {
            dep: dep.to_string(),
            governor,
            governor_gloss: String::new(),
            dependent,
            dependent_gloss: String::new(),
        }
    }

    #[test]
    fn test_root_edge() {
        let root = Governor::from_record(&edge("ROOT", 0, 2), &tokens()).unwrap();
        assert!(root.is_root());
        assert_eq!(root.governor_gloss(), "");
        assert_eq!(root.dependent_gloss(), "runs");

        let record = root.to_record();
        assert_eq!(record.governor, 0);
        assert_eq!(record.governor_gloss, "ROOT");
        assert_eq!(record.dependent, 2);
    }

    #[test]
    fn test_resolves_both_ends() {
        let nsubj = Governor::from_record(&edge("nsubj", 2, 1), &tokens()).unwrap();
        assert_eq!(nsubj.governor().unwrap().word(), "runs");
        assert_eq!(nsubj.dependent().word(), "John");
        assert_eq!(nsubj.to_string(), "nsubj");
        assert_eq!(
            nsubj.to_record(),
            DependencyRecord {
                dep: "nsubj".to_string(),
                governor: 2,
                governor_gloss: "runs".to_string(),
                dependent: 1,
                dependent_gloss: "John".to_string(),
            }
        );
    }

    #[test]
    fn test_out_of_range() {
        let err = Governor::from_record(&edge("obj", 2, 3), &tokens()).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::DependencyOutOfRange { index: 3, len: 2, .. }
        ));

        // 0 only means ROOT on the governor side
        assert!(Governor::from_record(&edge("obj", 2, 0), &tokens()).is_err());
    }
}
