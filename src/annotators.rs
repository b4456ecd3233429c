//! The engine's stock annotators, with their default options and
//! prerequisites.
//!
//! Every constructor takes caller options that are merged over the defaults,
//! so `annotators::ner(vec![("useSUTime", false.into())])` keeps
//! `applyNumericClassifiers` but turns SUTime off.

use crate::annotator::{Annotator, OptionValue};

pub const TOKENIZE: &str = "tokenize";
pub const SSPLIT: &str = "ssplit";
pub const POS: &str = "pos";
pub const LEMMA: &str = "lemma";
pub const NER: &str = "ner";
pub const PARSE: &str = "parse";
pub const DEPPARSE: &str = "depparse";
pub const RELATION: &str = "relation";
pub const REGEXNER: &str = "regexner";
pub const COREF: &str = "coref";
pub const DCOREF: &str = "dcoref";
pub const NATLOG: &str = "natlog";
pub const OPENIE: &str = "openie";

/// Pattern-matching utilities. They are marked on expressions the engine
/// matched, and double as the utility's endpoint name and option prefix.
/// They are not pipeline steps and have no catalog entry.
pub const TOKENSREGEX: &str = "tokensregex";
pub const SEMGREX: &str = "semgrex";
pub const TREGEX: &str = "tregex";

/// Every catalog key, in a stable order.
pub const KEYS: &[&str] = &[
    TOKENIZE, SSPLIT, POS, LEMMA, NER, PARSE, DEPPARSE, RELATION, REGEXNER, COREF, DCOREF,
    NATLOG, OPENIE,
];

/// Caller-supplied options for a catalog constructor.
pub type Options = Vec<(&'static str, OptionValue)>;

fn build(name: &str, defaults: Options, overrides: Options, dependencies: Vec<Annotator>) -> Annotator {
    Annotator::new(name)
        .with_options(defaults)
        .with_options(overrides)
        .with_dependencies(dependencies)
}

pub fn tokenize(options: Options) -> Annotator {
    build(
        TOKENIZE,
        vec![
            ("language", "Unspecified".into()),
            ("whitespace", false.into()),
            ("keepeol", false.into()),
            ("verbose", false.into()),
        ],
        options,
        Vec::new(),
    )
}

pub fn ssplit(options: Options) -> Annotator {
    build(
        SSPLIT,
        vec![
            ("eolonly", false.into()),
            ("isOneSentence", false.into()),
            ("newlineIsSentenceBreak", "never".into()),
            ("boundaryTokenRegex", r"\.|[!?]+".into()),
        ],
        options,
        vec![tokenize(Vec::new())],
    )
}

pub fn pos(options: Options) -> Annotator {
    build(
        POS,
        Vec::new(),
        options,
        vec![tokenize(Vec::new()), ssplit(Vec::new())],
    )
}

pub fn lemma(options: Options) -> Annotator {
    build(
        LEMMA,
        Vec::new(),
        options,
        vec![tokenize(Vec::new()), ssplit(Vec::new()), pos(Vec::new())],
    )
}

pub fn ner(options: Options) -> Annotator {
    build(
        NER,
        vec![
            ("useSUTime", true.into()),
            ("applyNumericClassifiers", true.into()),
        ],
        options,
        vec![
            tokenize(Vec::new()),
            ssplit(Vec::new()),
            pos(Vec::new()),
            lemma(Vec::new()),
        ],
    )
}

pub fn parse(options: Options) -> Annotator {
    build(
        PARSE,
        Vec::new(),
        options,
        vec![tokenize(Vec::new()), ssplit(Vec::new())],
    )
}

pub fn depparse(options: Options) -> Annotator {
    build(
        DEPPARSE,
        Vec::new(),
        options,
        vec![tokenize(Vec::new()), ssplit(Vec::new()), pos(Vec::new())],
    )
}

pub fn relation(options: Options) -> Annotator {
    build(
        RELATION,
        Vec::new(),
        options,
        vec![
            tokenize(Vec::new()),
            ssplit(Vec::new()),
            pos(Vec::new()),
            lemma(Vec::new()),
            ner(Vec::new()),
            depparse(Vec::new()),
        ],
    )
}

pub fn regexner(options: Options) -> Annotator {
    build(
        REGEXNER,
        vec![
            (
                "validpospattern",
                "(([ner:PERSON]*) /es/ /una/ /buena/ /persona/)".into(),
            ),
            ("verbose", true.into()),
        ],
        options,
        vec![tokenize(Vec::new()), ssplit(Vec::new())],
    )
}

pub fn coref(options: Options) -> Annotator {
    build(
        COREF,
        Vec::new(),
        options,
        vec![tokenize(Vec::new()), ssplit(Vec::new())],
    )
}

/// Deterministic (rule-based) coreference.
pub fn dcoref(options: Options) -> Annotator {
    build(
        DCOREF,
        Vec::new(),
        options,
        vec![
            tokenize(Vec::new()),
            ssplit(Vec::new()),
            pos(Vec::new()),
            lemma(Vec::new()),
            ner(Vec::new()),
            parse(Vec::new()),
        ],
    )
}

/// Natural-logic polarity marking.
pub fn natlog(options: Options) -> Annotator {
    build(
        NATLOG,
        Vec::new(),
        options,
        vec![
            tokenize(Vec::new()),
            ssplit(Vec::new()),
            pos(Vec::new()),
            lemma(Vec::new()),
            depparse(Vec::new()),
        ],
    )
}

pub fn openie(options: Options) -> Annotator {
    build(OPENIE, Vec::new(), options, vec![natlog(Vec::new())])
}

/// Look up a catalog annotator (with default options) by its step key.
pub fn by_key(key: &str) -> Option<Annotator> {
    let annotator = match key {
        TOKENIZE => tokenize(Vec::new()),
        SSPLIT => ssplit(Vec::new()),
        POS => pos(Vec::new()),
        LEMMA => lemma(Vec::new()),
        NER => ner(Vec::new()),
        PARSE => parse(Vec::new()),
        DEPPARSE => depparse(Vec::new()),
        RELATION => relation(Vec::new()),
        REGEXNER => regexner(Vec::new()),
        COREF => coref(Vec::new()),
        DCOREF => dcoref(Vec::new()),
        NATLOG => natlog(Vec::new()),
        OPENIE => openie(Vec::new()),
        _ => return None,
    };
    Some(annotator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_resolves() {
        for key in KEYS {
            let annotator = by_key(key).expect("catalog key");
            assert_eq!(annotator.name(), *key);
        }
        assert!(by_key("sentiment").is_none());
    }

    #[test]
    fn test_regexner_defaults() {
        let annotator = regexner(Vec::new());
        assert_eq!(annotator.option("verbose"), Some(&OptionValue::Bool(true)));
        assert_eq!(
            annotator.option("validpospattern"),
            Some(&OptionValue::Text(
                "(([ner:PERSON]*) /es/ /una/ /buena/ /persona/)".to_string()
            ))
        );

        let quiet = regexner(vec![("verbose", false.into())]);
        assert_eq!(quiet.option("verbose"), Some(&OptionValue::Bool(false)));
        assert!(quiet.option("validpospattern").is_some());
    }

    #[test]
    fn test_overrides_merge_over_defaults() {
        let annotator = ner(vec![("useSUTime", false.into())]);
        assert_eq!(annotator.option("useSUTime"), Some(&OptionValue::Bool(false)));
        assert_eq!(
            annotator.option("applyNumericClassifiers"),
            Some(&OptionValue::Bool(true))
        );
    }
}
