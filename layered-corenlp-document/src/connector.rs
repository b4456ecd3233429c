//! The boundary to the annotation engine.
//!
//! Transports (an HTTP client, a local process runner) implement
//! [`Connector`]; this crate never talks to the network itself.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use layered_corenlp::{OptionValue, Pipeline};

use crate::config::Language;
use crate::error::ConnectorError;

/// Everything a transport needs for one engine call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRequest {
    pub text: String,
    /// Step names in execution order
    pub annotators: Vec<String>,
    /// Options keyed as `"<step>.<key>"`
    pub options: BTreeMap<String, OptionValue>,
    pub language: Language,
    /// Pattern-matching utility to call instead of the plain pipeline
    pub utility: Option<String>,
}

impl AnnotationRequest {
    pub fn new(text: impl Into<String>, pipeline: &Pipeline, language: Language) -> Self {
        Self {
            text: text.into(),
            annotators: pipeline.steps().to_vec(),
            options: pipeline.options().clone(),
            language,
            utility: None,
        }
    }

    pub fn with_utility(mut self, utility: impl Into<String>) -> Self {
        self.utility = Some(utility.into());
        self
    }

    /// Query parameters for a utility call: every option prefixed with
    /// `"<utility>."`, with the prefix removed. Empty without a utility.
    pub fn utility_params(&self) -> BTreeMap<String, String> {
        let prefix = match &self.utility {
            Some(utility) => format!("{}.", utility),
            None => return BTreeMap::new(),
        };
        self.options
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(prefix.as_str())
                    .map(|name| (name.to_string(), value.to_string()))
            })
            .collect()
    }

    /// The engine's `properties` object: the joined step list, every option,
    /// and `outputFormat = json`.
    pub fn properties(&self) -> Value {
        let mut properties = Map::new();
        properties.insert("annotators".to_string(), Value::from(self.annotators.join(",")));
        for (key, value) in &self.options {
            properties.insert(key.clone(), option_json(value));
        }
        properties.insert("outputFormat".to_string(), Value::from("json"));
        Value::Object(properties)
    }
}

fn option_json(value: &OptionValue) -> Value {
    match value {
        OptionValue::Bool(flag) => Value::from(*flag),
        OptionValue::Int(int) => Value::from(*int),
        OptionValue::Float(float) => Value::from(*float),
        OptionValue::Text(text) => Value::from(text.as_str()),
    }
}

/// A synchronous transport returning the engine's raw JSON response.
pub trait Connector {
    fn fetch(&self, request: &AnnotationRequest) -> Result<Value, ConnectorError>;
}

impl<C: Connector + ?Sized> Connector for &C {
    fn fetch(&self, request: &AnnotationRequest) -> Result<Value, ConnectorError> {
        (**self).fetch(request)
    }
}

impl<C: Connector + ?Sized> Connector for Box<C> {
    fn fetch(&self, request: &AnnotationRequest) -> Result<Value, ConnectorError> {
        (**self).fetch(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layered_corenlp::annotators;
    use serde_json::json;

    #[test]
    fn test_properties_object() {
        let mut pipeline = Pipeline::compile(&annotators::ssplit(vec![("eolonly", true.into())])).unwrap();
        pipeline.set_option("tokenize.verbose", 1_i64);
        let request = AnnotationRequest::new("Hola.", &pipeline, Language::Spanish);

        assert_eq!(
            request.properties(),
            json!({
                "annotators": "tokenize,ssplit",
                "outputFormat": "json",
                "ssplit.boundaryTokenRegex": "\\.|[!?]+",
                "ssplit.eolonly": true,
                "ssplit.isOneSentence": false,
                "ssplit.newlineIsSentenceBreak": "never",
                "tokenize.keepeol": false,
                "tokenize.language": "Unspecified",
                "tokenize.verbose": 1,
                "tokenize.whitespace": false
            })
        );
    }

    #[test]
    fn test_utility_params() {
        let mut pipeline = Pipeline::compile(&annotators::tokenize(Vec::new())).unwrap();
        pipeline.set_option("semgrex.pattern", "{word:saw} >nsubj {}=subject");
        pipeline.set_option("semgrex.filter", true);
        pipeline.set_option("tregex.pattern", "NP");

        let plain = AnnotationRequest::new("I saw it.", &pipeline, Language::English);
        assert_eq!(plain.utility, None);
        assert!(plain.utility_params().is_empty());

        let request = plain.with_utility("semgrex");
        let params = request.utility_params();
        assert_eq!(params.len(), 2);
        assert_eq!(params["pattern"], "{word:saw} >nsubj {}=subject");
        assert_eq!(params["filter"], "true");
        assert!(request.properties().get("semgrex.pattern").is_some());
    }

    #[test]
    fn test_output_format_cannot_be_overridden() {
        let mut pipeline = Pipeline::compile_many(&[]).unwrap();
        pipeline.set_option("outputFormat", "xml");
        let request = AnnotationRequest::new("", &pipeline, Language::Unspecified);
        assert_eq!(request.properties()["outputFormat"], json!("json"));
    }
}
