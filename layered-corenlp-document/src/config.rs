//! Pipeline configuration.
//!
//! A [`PipelineConfig`] names the language, the requested step keys and
//! any option overrides. It can be written by hand, loaded from TOML:
//!
//! ```toml
//! language = "Spanish"
//! annotators = ["tokenize", "ssplit", "pos"]
//!
//! [options]
//! "ssplit.eolonly" = true
//! ```
//!
//! or read from an engine-style `.properties` file:
//!
//! ```text
//! annotators = tokenize, ssplit, pos
//! pipelineLanguage = Spanish
//! ssplit.eolonly = true
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use layered_corenlp::{annotators, OptionValue, Pipeline, PipelineError};

use crate::error::ConfigError;

const ANNOTATORS_KEY: &str = "annotators";
const LANGUAGE_KEY: &str = "pipelineLanguage";

/// Languages the engine ships models for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    French,
    German,
    Spanish,
    Unspecified,
}

impl Default for Language {
    fn default() -> Self {
        Language::Unspecified
    }
}

impl Language {
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "French",
            Language::German => "German",
            Language::Spanish => "Spanish",
            Language::Unspecified => "Unspecified",
        }
    }

    /// ISO 639-1 code, when there is one.
    pub fn iso2(self) -> Option<&'static str> {
        match self {
            Language::English => Some("en"),
            Language::French => Some("fr"),
            Language::German => Some("de"),
            Language::Spanish => Some("es"),
            Language::Unspecified => None,
        }
    }

    /// Value for the engine's `pipelineLanguage` parameter.
    pub fn pipeline_language(self) -> String {
        self.name().to_lowercase()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the language name in any case, or its ISO 639-1 code.
impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        [
            Language::English,
            Language::French,
            Language::German,
            Language::Spanish,
            Language::Unspecified,
        ]
        .iter()
        .copied()
        .find(|language| {
            language.name().eq_ignore_ascii_case(value)
                || language.iso2().map_or(false, |iso| iso.eq_ignore_ascii_case(value))
        })
        .ok_or_else(|| ConfigError::UnknownLanguage(value.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub language: Language,
    /// Requested step keys, in request order
    #[serde(default)]
    pub annotators: Vec<String>,
    /// Overrides keyed as `"<step>.<key>"`
    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,
}

impl PipelineConfig {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn with_annotators<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.annotators.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load from a TOML file. A missing file yields the default config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse `key = value` (or `key: value`) lines. Blank lines and lines
    /// starting with `#` or `!` are skipped.
    pub fn from_properties_str(source: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for (number, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let (key, value) = line
                .split_once(|c: char| c == '=' || c == ':')
                .map(|(key, value)| (key.trim(), value.trim()))
                .ok_or_else(|| ConfigError::Properties {
                    line: number + 1,
                    message: format!("expected `key = value`, found `{}`", line),
                })?;

            match key {
                ANNOTATORS_KEY => {
                    config.annotators = value
                        .split(',')
                        .map(str::trim)
                        .filter(|step| !step.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                LANGUAGE_KEY => config.language = value.parse()?,
                _ => {
                    config.options.insert(key.to_string(), scalar(value));
                }
            }
        }

        Ok(config)
    }

    /// Render as `key = value` lines: annotators first, then the language
    /// (when specified), then options in key order.
    pub fn to_properties_file_content(&self) -> String {
        let mut lines = Vec::new();
        if !self.annotators.is_empty() {
            lines.push(format!("{} = {}", ANNOTATORS_KEY, self.annotators.join(",")));
        }
        if self.language != Language::Unspecified {
            lines.push(format!("{} = {}", LANGUAGE_KEY, self.language));
        }
        for (key, value) in &self.options {
            lines.push(format!("{} = {}", key, value));
        }
        lines.join("\n")
    }

    /// Compile the configured keys through the stock catalog, then apply
    /// the configured options over the catalog defaults.
    pub fn pipeline(&self) -> Result<Pipeline, PipelineError> {
        let requested = self
            .annotators
            .iter()
            .map(|key| {
                annotators::by_key(key).ok_or_else(|| PipelineError::UnknownAnnotator { key: key.clone() })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut pipeline = Pipeline::compile_many(&requested)?;
        for (key, value) in &self.options {
            pipeline.set_option(key.clone(), value.clone());
        }
        Ok(pipeline)
    }
}

fn scalar(value: &str) -> OptionValue {
    if let Ok(flag) = value.parse::<bool>() {
        OptionValue::Bool(flag)
    } else if let Ok(int) = value.parse::<i64>() {
        OptionValue::Int(int)
    } else if let Ok(float) = value.parse::<f64>() {
        OptionValue::Float(float)
    } else {
        OptionValue::Text(value.to_string())
    }
}
