//! Coreference chains and their mentions.

use std::fmt;

use serde::{Deserialize, Serialize};

use layered_corenlp::{nth, AccessError};

use crate::record::MentionRecord;

/// Engine enums read from their SCREAMING_SNAKE_CASE spelling.
///
/// `UNKNOWN` (or a missing field) becomes `Unknown`. Any other spelling is
/// kept verbatim in `Other` and written back unchanged.
macro_rules! engine_enum {
    ($ty:ident { $($variant:ident => $text:literal),* $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $ty {
            $($variant,)*
            Unknown,
            Other(String),
        }

        impl $ty {
            pub fn as_str(&self) -> &str {
                match self {
                    $($ty::$variant => $text,)*
                    $ty::Unknown => "UNKNOWN",
                    $ty::Other(raw) => raw,
                }
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                $ty::Unknown
            }
        }

        impl From<String> for $ty {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $($text => $ty::$variant,)*
                    "UNKNOWN" => $ty::Unknown,
                    _ => $ty::Other(raw),
                }
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                match value {
                    $ty::Other(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

engine_enum!(Animacy {
    Animate => "ANIMATE",
    Inanimate => "INANIMATE",
});

engine_enum!(Gender {
    Male => "MALE",
    Female => "FEMALE",
    Neutral => "NEUTRAL",
});

engine_enum!(Number {
    Singular => "SINGULAR",
    Plural => "PLURAL",
});

engine_enum!(MentionType {
    Pronominal => "PRONOMINAL",
    Nominal => "NOMINAL",
    Proper => "PROPER",
    List => "LIST",
});

/// A single mention of an entity.
///
/// Once its chain is attached to a document, a mention carries an anchor:
/// the 0-based sentence index and token index of its first token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorefMention {
    record: MentionRecord,
    anchor: Option<(usize, usize)>,
}

impl CorefMention {
    pub fn from_record(record: MentionRecord) -> Self {
        Self {
            record,
            anchor: None,
        }
    }

    pub fn id(&self) -> usize {
        self.record.id
    }

    pub fn text(&self) -> &str {
        &self.record.text
    }

    /// 1-based.
    pub fn sent_num(&self) -> usize {
        self.record.sent_num
    }

    pub fn head_index(&self) -> usize {
        self.record.head_index
    }

    /// 1-based.
    pub fn start_index(&self) -> usize {
        self.record.start_index
    }

    /// 1-based, exclusive.
    pub fn end_index(&self) -> usize {
        self.record.end_index
    }

    pub fn is_representative(&self) -> bool {
        self.record.is_representative_mention
    }

    pub fn animacy(&self) -> Animacy {
        self.record.animacy.clone()
    }

    pub fn gender(&self) -> Gender {
        self.record.gender.clone()
    }

    pub fn number(&self) -> Number {
        self.record.number.clone()
    }

    pub fn mention_type(&self) -> MentionType {
        self.record.mention_type.clone()
    }

    pub fn position(&self) -> &[usize] {
        &self.record.position
    }

    /// 0-based sentence index, once anchored.
    pub fn sentence_index(&self) -> Option<usize> {
        self.anchor.map(|(sentence, _)| sentence)
    }

    /// 0-based token index within the sentence, once anchored.
    pub fn token_index(&self) -> Option<usize> {
        self.anchor.map(|(_, token)| token)
    }

    pub(crate) fn set_anchor(&mut self, sentence: usize, token: usize) {
        self.anchor = Some((sentence, token));
    }

    pub fn to_record(&self) -> MentionRecord {
        self.record.clone()
    }
}

/// All mentions of one entity, in engine order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorefChain {
    id: String,
    mentions: Vec<CorefMention>,
}

impl CorefChain {
    pub fn from_records(id: impl Into<String>, records: Vec<MentionRecord>) -> Self {
        Self {
            id: id.into(),
            mentions: records.into_iter().map(CorefMention::from_record).collect(),
        }
    }

    /// The engine's key for this chain.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mentions(&self) -> &[CorefMention] {
        &self.mentions
    }

    pub fn mention(&self, index: usize) -> Result<&CorefMention, AccessError> {
        nth(&self.mentions, index, "mention")
    }

    pub(crate) fn mentions_mut(&mut self) -> &mut [CorefMention] {
        &mut self.mentions
    }

    /// First mention flagged as representative, if any.
    pub fn representative(&self) -> Option<&CorefMention> {
        self.mentions.iter().find(|mention| mention.is_representative())
    }

    pub fn non_representatives(&self) -> impl Iterator<Item = &CorefMention> {
        self.mentions.iter().filter(|mention| !mention.is_representative())
    }

    pub fn to_record(&self) -> Vec<MentionRecord> {
        self.mentions.iter().map(CorefMention::to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mention(id: usize, text: &str, representative: bool) -> MentionRecord {
        MentionRecord {
            id,
            text: text.to_string(),
            mention_type: MentionType::Proper,
            number: Number::Singular,
            gender: Gender::Female,
            animacy: Animacy::Animate,
            start_index: 1,
            end_index: 2,
            head_index: 1,
            sent_num: 1,
            position: vec![1, id],
            is_representative_mention: representative,
        }
    }

    #[test]
    fn test_representative_and_rest() {
        let chain = CorefChain::from_records(
            "7",
            vec![
                mention(1, "she", false),
                mention(2, "Maria", true),
                mention(3, "her", false),
            ],
        );

        assert_eq!(chain.id(), "7");
        assert_eq!(chain.representative().unwrap().text(), "Maria");
        let rest: Vec<&str> = chain.non_representatives().map(CorefMention::text).collect();
        assert_eq!(rest, vec!["she", "her"]);
    }

    #[test]
    fn test_no_representative() {
        let chain = CorefChain::from_records("1", vec![mention(1, "it", false)]);
        assert!(chain.representative().is_none());
        assert_eq!(chain.non_representatives().count(), 1);
    }

    #[test]
    fn test_mention_index() {
        let chain = CorefChain::from_records("1", vec![mention(1, "it", false)]);
        assert_eq!(chain.mention(0).unwrap().id(), 1);
        assert!(matches!(
            chain.mention(1),
            Err(AccessError::IndexOutOfRange { index: 1, len: 1, .. })
        ));
    }

    #[test]
    fn test_enum_spellings() {
        assert_eq!(Gender::from("FEMALE".to_string()), Gender::Female);
        assert_eq!(Number::from("UNKNOWN".to_string()), Number::Unknown);
        assert_eq!(
            MentionType::from("DEMONSTRATIVE".to_string()),
            MentionType::Other("DEMONSTRATIVE".to_string())
        );
        assert_eq!(String::from(Animacy::Inanimate), "INANIMATE");
        assert_eq!(Gender::Other("EPICENE".to_string()).to_string(), "EPICENE");
    }

    #[test]
    fn test_unanchored_until_attached() {
        let chain = CorefChain::from_records("1", vec![mention(1, "it", false)]);
        assert_eq!(chain.mentions()[0].sentence_index(), None);
        assert_eq!(chain.mentions()[0].token_index(), None);
    }
}
