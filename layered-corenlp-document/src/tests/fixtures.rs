//! Engine responses and an in-memory connector shared by the scenario tests.

use std::cell::RefCell;

use serde_json::{json, Value};

use crate::{AnnotationRequest, Connector, ConnectorError};

pub const TEXT: &str = "Mary met John. He smiled.";

fn token(index: usize, word: &str, begin: usize, pos: &str, lemma: &str, ner: &str, after: &str) -> Value {
    let before = if begin == 0 { "" } else { " " };
    json!({
        "index": index,
        "word": word,
        "originalText": word,
        "characterOffsetBegin": begin,
        "characterOffsetEnd": begin + word.len(),
        "before": before,
        "after": after,
        "pos": pos,
        "lemma": lemma,
        "ner": ner
    })
}

fn edge(dep: &str, governor: usize, governor_gloss: &str, dependent: usize, dependent_gloss: &str) -> Value {
    json!({
        "dep": dep,
        "governor": governor,
        "governorGloss": governor_gloss,
        "dependent": dependent,
        "dependentGloss": dependent_gloss
    })
}

/// Full response for [`TEXT`]: tokens, tags, parses, dependencies and one
/// coreference chain linking "John" and "He".
pub fn full_response() -> Value {
    json!({
        "sentences": [
            {
                "index": 0,
                "tokens": [
                    token(1, "Mary", 0, "NNP", "Mary", "PERSON", " "),
                    token(2, "met", 5, "VBD", "meet", "O", " "),
                    token(3, "John", 9, "NNP", "John", "PERSON", ""),
                    token(4, ".", 13, ".", ".", "O", " ")
                ],
                "parse": "(ROOT\n  (S\n    (NP (NNP Mary))\n    (VP (VBD met)\n      (NP (NNP John)))\n    (. .)))",
                "basicDependencies": [
                    edge("ROOT", 0, "ROOT", 2, "met"),
                    edge("nsubj", 2, "met", 1, "Mary"),
                    edge("obj", 2, "met", 3, "John"),
                    edge("punct", 2, "met", 4, ".")
                ],
                "enhancedDependencies": [
                    edge("ROOT", 0, "ROOT", 2, "met"),
                    edge("nsubj", 2, "met", 1, "Mary")
                ]
            },
            {
                "index": 1,
                "tokens": [
                    token(1, "He", 15, "PRP", "he", "O", " "),
                    token(2, "smiled", 18, "VBD", "smile", "O", ""),
                    token(3, ".", 24, ".", ".", "O", "")
                ],
                "parse": "(ROOT\n  (S\n    (NP (PRP He))\n    (VP (VBD smiled))\n    (. .)))",
                "basicDependencies": [
                    edge("ROOT", 0, "ROOT", 2, "smiled"),
                    edge("nsubj", 2, "smiled", 1, "He"),
                    edge("punct", 2, "smiled", 3, ".")
                ]
            }
        ],
        "corefs": {
            "2": [
                {
                    "id": 2,
                    "text": "John",
                    "type": "PROPER",
                    "number": "SINGULAR",
                    "gender": "MALE",
                    "animacy": "ANIMATE",
                    "startIndex": 3,
                    "endIndex": 4,
                    "headIndex": 3,
                    "sentNum": 1,
                    "position": [1, 2],
                    "isRepresentativeMention": true
                },
                {
                    "id": 3,
                    "text": "He",
                    "type": "PRONOMINAL",
                    "number": "SINGULAR",
                    "gender": "MALE",
                    "animacy": "ANIMATE",
                    "startIndex": 1,
                    "endIndex": 2,
                    "headIndex": 1,
                    "sentNum": 2,
                    "position": [2, 1],
                    "isRepresentativeMention": false
                }
            ]
        }
    })
}

/// Tokens only: what a `tokenize,ssplit` pipeline returns.
pub fn tokens_only_response() -> Value {
    json!({
        "sentences": [
            { "index": 0, "tokens": [{ "index": 1, "word": "Hola" }, { "index": 2, "word": "." }] }
        ]
    })
}

/// TokensRegex answer for [`TEXT`] with the pattern `(?$who [ner:PERSON])`.
pub fn person_matches_response() -> Value {
    json!({
        "sentences": [
            {
                "0": {
                    "text": "Mary", "begin": 0, "end": 1,
                    "$who": { "text": "Mary", "begin": 0, "end": 1 }
                },
                "1": {
                    "text": "John", "begin": 2, "end": 3,
                    "$who": { "text": "John", "begin": 2, "end": 3 }
                },
                "length": 2
            },
            { "length": 0 }
        ]
    })
}

/// Replays a canned response and records every request it receives.
pub struct FixtureConnector {
    response: Result<Value, ConnectorError>,
    pub requests: RefCell<Vec<AnnotationRequest>>,
}

impl FixtureConnector {
    pub fn new(response: Value) -> Self {
        Self {
            response: Ok(response),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(error: ConnectorError) -> Self {
        Self {
            response: Err(error),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl Connector for FixtureConnector {
    fn fetch(&self, request: &AnnotationRequest) -> Result<Value, ConnectorError> {
        self.requests.borrow_mut().push(request.clone());
        self.response.clone()
    }
}
