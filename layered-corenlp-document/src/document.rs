//! Documents: sentences plus cross-sentence coreference chains.

use std::collections::BTreeMap;

use tracing::debug;

use layered_corenlp::annotators::{COREF, DCOREF, SSPLIT};
use layered_corenlp::{nth, AccessError, Annotable};

use crate::coref::{CorefChain, CorefMention};
use crate::error::DocumentError;
use crate::hydrate::Annotated;
use crate::record::{numeric_key, DocumentRecord};
use crate::sentence::Sentence;
use crate::token::Token;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    annotable: Annotable,
    sentences: Vec<Sentence>,
    corefs: Vec<CorefChain>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            annotable: Annotable::new(text),
            ..Self::default()
        }
    }

    pub fn from_record(record: DocumentRecord) -> Result<Self, DocumentError> {
        let mut document = Self::default();
        document.hydrate(record)?;
        Ok(document)
    }

    pub fn text(&self) -> &str {
        self.annotable.text()
    }

    pub fn language(&self) -> Option<&str> {
        self.annotable.language()
    }

    pub fn sentences(&self) -> Result<&[Sentence], AccessError> {
        self.annotable.require(SSPLIT, "sentences")?;
        Ok(&self.sentences)
    }

    pub fn sentence(&self, index: usize) -> Result<&Sentence, AccessError> {
        nth(self.sentences()?, index, "sentence")
    }

    /// Chains in numeric id order. Satisfied by either coreference step.
    pub fn corefs(&self) -> Result<&[CorefChain], AccessError> {
        self.annotable
            .require_any(&[COREF, DCOREF], "coreference chains")?;
        Ok(&self.corefs)
    }

    pub fn coref(&self, index: usize) -> Result<&CorefChain, AccessError> {
        nth(self.corefs()?, index, "coreference chain")
    }

    /// Sentence a mention was anchored to.
    pub fn mention_sentence(&self, mention: &CorefMention) -> Result<&Sentence, DocumentError> {
        let index = mention
            .sentence_index()
            .ok_or_else(|| mention_out_of_range(mention))?;
        Ok(self.sentence(index)?)
    }

    /// First token of a mention.
    pub fn mention_token(&self, mention: &CorefMention) -> Result<&Token, DocumentError> {
        let index = mention
            .token_index()
            .ok_or_else(|| mention_out_of_range(mention))?;
        Ok(self.mention_sentence(mention)?.token(index)?)
    }

    pub fn to_record(&self) -> DocumentRecord {
        DocumentRecord {
            sentences: if self.annotable.has_annotator(SSPLIT) {
                Some(self.sentences.iter().map(Sentence::to_record).collect())
            } else {
                None
            },
            corefs: if self.annotable.has_annotator(COREF) {
                Some(
                    self.corefs
                        .iter()
                        .map(|chain| (chain.id().to_string(), chain.to_record()))
                        .collect::<BTreeMap<_, _>>(),
                )
            } else {
                None
            },
        }
    }

    /// Anchor every mention at `(sentNum - 1, startIndex - 1)`.
    fn attach(&self, chain: &mut CorefChain) -> Result<(), DocumentError> {
        for mention in chain.mentions_mut() {
            let sentence = mention.sent_num().checked_sub(1);
            let token = mention.start_index().checked_sub(1);
            match (sentence, token) {
                (Some(sentence), Some(token))
                    if self
                        .sentences
                        .get(sentence)
                        .map_or(false, |found| token < found.token_count()) =>
                {
                    mention.set_anchor(sentence, token);
                }
                _ => return Err(mention_out_of_range(mention)),
            }
        }
        Ok(())
    }
}

fn mention_out_of_range(mention: &CorefMention) -> DocumentError {
    DocumentError::MentionOutOfRange {
        id: mention.id(),
        sent_num: mention.sent_num(),
        start_index: mention.start_index(),
    }
}

impl Annotated for Document {
    fn annotable(&self) -> &Annotable {
        &self.annotable
    }

    fn annotable_mut(&mut self) -> &mut Annotable {
        &mut self.annotable
    }

    /// Sentences are hydrated first; coreference chains are anchored
    /// against them afterwards. Steps satisfied by every sentence are also
    /// marked on the document.
    fn hydrate(&mut self, record: DocumentRecord) -> Result<(), DocumentError> {
        if let Some(sentences) = record.sentences {
            self.sentences = sentences
                .into_iter()
                .map(Sentence::from_record)
                .collect::<Result<_, _>>()?;
            self.annotable.add_annotator(SSPLIT);

            if let Some((first, rest)) = self.sentences.split_first() {
                let shared: Vec<String> = first
                    .annotable()
                    .annotators()
                    .filter(|step| rest.iter().all(|other| other.annotable().has_annotator(*step)))
                    .map(str::to_string)
                    .collect();
                self.annotable.add_annotators(shared);
            }
        }

        if let Some(corefs) = record.corefs {
            let mut entries: Vec<_> = corefs.into_iter().collect();
            entries.sort_by(|(left, _), (right, _)| numeric_key(left).cmp(&numeric_key(right)));

            let mut chains = Vec::with_capacity(entries.len());
            for (id, mentions) in entries {
                let mut chain = CorefChain::from_records(id, mentions);
                self.attach(&mut chain)?;
                chains.push(chain);
            }
            self.corefs = chains;
            self.annotable.add_annotator(COREF);
        }

        debug!(
            sentences = self.sentences.len(),
            chains = self.corefs.len(),
            annotators = ?self.annotable.annotators().collect::<Vec<_>>(),
            "hydrated document"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_sentences() -> DocumentRecord {
        serde_json::from_value(json!({
            "sentences": [
                {
                    "index": 0,
                    "tokens": [
                        { "index": 1, "word": "Maria", "lemma": "Maria" },
                        { "index": 2, "word": "arrived", "lemma": "arrive" }
                    ]
                },
                {
                    "index": 1,
                    "tokens": [
                        { "index": 1, "word": "She", "lemma": "she" },
                        { "index": 2, "word": "smiled" }
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_sentences_guarded_by_ssplit() {
        let document = Document::new("Maria arrived. She smiled.");
        assert!(matches!(
            document.sentences(),
            Err(AccessError::MissingAnnotator { what: "sentences", .. })
        ));

        let document = Document::from_record(two_sentences()).unwrap();
        assert_eq!(document.sentences().unwrap().len(), 2);
        assert_eq!(document.sentence(1).unwrap().word(0).unwrap(), "She");
    }

    #[test]
    fn test_shared_steps_marked_on_document() {
        let document = Document::from_record(two_sentences()).unwrap();
        let marked: Vec<&str> = document.annotable().annotators().collect();
        // lemma is marked on both sentences since each has a lemma somewhere
        assert_eq!(marked, vec!["lemma", "ssplit", "tokenize"]);
    }

    #[test]
    fn test_corefs_guarded() {
        let document = Document::from_record(two_sentences()).unwrap();
        let err = document.corefs().unwrap_err();
        assert_eq!(
            err.to_string(),
            "asked for coreference chains, but the `coref|dcoref` annotator has not been run"
        );
    }

    #[test]
    fn test_corefs_accept_dcoref_mark() {
        let mut document = Document::from_record(two_sentences()).unwrap();
        document.annotable_mut().add_annotator(DCOREF);
        assert!(document.corefs().unwrap().is_empty());
    }

    #[test]
    fn test_mention_out_of_range() {
        let mut record = two_sentences();
        record.corefs = Some(
            serde_json::from_value(json!({
                "1": [{
                    "id": 1, "text": "She", "type": "PRONOMINAL",
                    "startIndex": 5, "endIndex": 6, "headIndex": 5, "sentNum": 2,
                    "isRepresentativeMention": false
                }]
            }))
            .unwrap(),
        );

        assert!(matches!(
            Document::from_record(record),
            Err(DocumentError::MentionOutOfRange {
                id: 1,
                sent_num: 2,
                start_index: 5
            })
        ));
    }

    #[test]
    fn test_chains_in_numeric_id_order() {
        let mut record = two_sentences();
        let chains: serde_json::Map<String, serde_json::Value> = (1..=12)
            .map(|id| {
                (
                    id.to_string(),
                    json!([{
                        "id": id, "text": "Maria",
                        "startIndex": 1, "endIndex": 2, "headIndex": 1, "sentNum": 1
                    }]),
                )
            })
            .collect();
        record.corefs = Some(serde_json::from_value(serde_json::Value::Object(chains)).unwrap());

        let document = Document::from_record(record).unwrap();
        let ids: Vec<&str> = document.corefs().unwrap().iter().map(CorefChain::id).collect();
        assert_eq!(
            ids,
            vec!["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"]
        );
        assert_eq!(document.coref(9).unwrap().id(), "10");
        assert_eq!(document.coref(1).unwrap().mention(0).unwrap().id(), 2);
    }

    #[test]
    fn test_sentence_number_zero_is_out_of_range() {
        let mut record = two_sentences();
        record.corefs = Some(
            serde_json::from_value(json!({
                "1": [{
                    "id": 4, "text": "Maria",
                    "startIndex": 1, "endIndex": 2, "headIndex": 1, "sentNum": 0
                }]
            }))
            .unwrap(),
        );
        assert!(Document::from_record(record).is_err());
    }
}
