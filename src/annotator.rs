//! Annotators: named, configurable steps with declared prerequisites.
//!
//! An [`Annotator`] is a value object. Its identity is its name: two
//! differently-configured `tokenize` annotators are the same step as far as
//! dependency satisfaction is concerned. Dependencies are owned, so the graph
//! is a tree of values; shared prerequisites are simply repeated and collapsed
//! again by name when the pipeline is flattened.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::pipeline::Pipeline;

/// Anything that identifies an annotation step by name.
///
/// Implemented for [`Annotator`] and for plain strings, so state trackers can
/// be queried with either.
pub trait Step {
    /// The step name, e.g. `"tokenize"`.
    fn name(&self) -> &str;
}

impl Step for str {
    fn name(&self) -> &str {
        self
    }
}

impl Step for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl<T: Step + ?Sized> Step for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A scalar option value passed through to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(value) => write!(f, "{}", value),
            OptionValue::Int(value) => write!(f, "{}", value),
            OptionValue::Float(value) => write!(f, "{}", value),
            OptionValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

/// A named annotation step with its own options and prerequisite steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotator {
    name: String,
    /// Options without the step-name prefix
    #[serde(default)]
    options: BTreeMap<String, OptionValue>,
    /// Prerequisites, in declaration order
    #[serde(default)]
    dependencies: Vec<Annotator>,
}

impl Annotator {
    /// Create an annotator with no options and no dependencies.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: BTreeMap::new(),
            dependencies: Vec::new(),
        }
    }

    /// Set a single option, replacing any previous value for `key`.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Merge options over the current ones.
    pub fn with_options<I, K>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (K, OptionValue)>,
        K: Into<String>,
    {
        self.options
            .extend(options.into_iter().map(|(key, value)| (key.into(), value)));
        self
    }

    /// Append a prerequisite.
    pub fn with_dependency(mut self, dependency: Annotator) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Append several prerequisites, keeping their order.
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = Annotator>) -> Self {
        self.dependencies.extend(dependencies);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Options of this step only, without the name prefix.
    pub fn options(&self) -> &BTreeMap<String, OptionValue> {
        &self.options
    }

    pub fn option(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }

    /// Set an option in place, returning the previous value.
    pub fn set_option(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.options.insert(key.into(), value.into())
    }

    pub fn dependencies(&self) -> &[Annotator] {
        &self.dependencies
    }

    /// Shallow comparison: true when both refer to the same step name,
    /// regardless of options or dependencies.
    pub fn same_step<S: Step + ?Sized>(&self, other: &S) -> bool {
        self.name == other.name()
    }

    /// Step names required to run this annotator, ending with its own name.
    pub fn pipeline(&self) -> Result<Vec<String>, PipelineError> {
        Pipeline::compile(self).map(Pipeline::into_steps)
    }

    /// Options of this annotator and all of its prerequisites, keyed as
    /// `"<step>.<key>"`.
    pub fn pipeline_options(&self) -> Result<BTreeMap<String, OptionValue>, PipelineError> {
        Pipeline::compile(self).map(Pipeline::into_options)
    }
}

impl Step for Annotator {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Annotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_step_ignores_options() {
        let plain = Annotator::new("ner");
        let tuned = Annotator::new("ner").with_option("useSUTime", false);

        assert!(plain.same_step(&tuned));
        assert!(plain.same_step("ner"));
        assert!(!plain.same_step("pos"));
    }

    #[test]
    fn test_option_get_and_set() {
        let mut annotator = Annotator::new("tokenize").with_option("whitespace", false);
        assert_eq!(annotator.option("whitespace"), Some(&OptionValue::Bool(false)));

        let previous = annotator.set_option("whitespace", true);
        assert_eq!(previous, Some(OptionValue::Bool(false)));
        assert_eq!(annotator.option("whitespace"), Some(&OptionValue::Bool(true)));
        assert_eq!(annotator.option("missing"), None);
    }

    #[test]
    fn test_with_options_overrides() {
        let annotator = Annotator::new("ssplit")
            .with_option("eolonly", false)
            .with_options(vec![("eolonly", OptionValue::Bool(true))]);
        assert_eq!(annotator.option("eolonly"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn test_option_value_display() {
        assert_eq!(OptionValue::from(true).to_string(), "true");
        assert_eq!(OptionValue::from(3_i64).to_string(), "3");
        assert_eq!(OptionValue::from("never").to_string(), "never");
    }

    #[test]
    fn test_option_value_untagged_json() {
        let parsed: BTreeMap<String, OptionValue> =
            serde_json::from_str(r#"{"a": true, "b": 2, "c": 0.5, "d": "x"}"#).unwrap();
        assert_eq!(parsed["a"], OptionValue::Bool(true));
        assert_eq!(parsed["b"], OptionValue::Int(2));
        assert_eq!(parsed["c"], OptionValue::Float(0.5));
        assert_eq!(parsed["d"], OptionValue::Text("x".to_string()));
    }
}
