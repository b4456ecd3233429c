//! Pipeline compilation: flattening an annotator graph into the ordered list
//! of step names the engine must run, plus the merged option mapping.
//!
//! Ordering rules:
//! - each dependency's own pipeline is computed in declaration order;
//! - the sub-pipelines are concatenated and de-duplicated keeping the
//!   *first* occurrence;
//! - the annotator's own name is appended last.
//!
//! Options follow the same walk: dependencies first (declaration order), then
//! the annotator's own options prefixed with `"<name>."`. Later entries
//! overwrite earlier ones.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::annotator::{Annotator, OptionValue};
use crate::error::PipelineError;

/// A flattened, ready-to-send pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    /// Step names in execution order, no duplicates
    steps: Vec<String>,
    /// Options keyed as `"<step>.<key>"`
    options: BTreeMap<String, OptionValue>,
}

impl Pipeline {
    /// Flatten a single annotator.
    pub fn compile(annotator: &Annotator) -> Result<Self, PipelineError> {
        let mut path = Vec::new();
        let steps = flatten_steps(annotator, &mut path)?;
        let mut options = BTreeMap::new();
        collect_options(annotator, &mut options);

        debug!(annotator = annotator.name(), steps = ?steps, "compiled pipeline");

        Ok(Self { steps, options })
    }

    /// Flatten several requested annotators as one pipeline.
    ///
    /// Each annotator's pipeline is appended in order with the same
    /// keep-first de-duplication. No synthetic step of its own is added.
    pub fn compile_many(annotators: &[Annotator]) -> Result<Self, PipelineError> {
        let mut seen = HashSet::new();
        let mut steps = Vec::new();
        let mut options = BTreeMap::new();

        for annotator in annotators {
            let compiled = Self::compile(annotator)?;
            for step in compiled.steps {
                if seen.insert(step.clone()) {
                    steps.push(step);
                }
            }
            options.extend(compiled.options);
        }

        Ok(Self { steps, options })
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn options(&self) -> &BTreeMap<String, OptionValue> {
        &self.options
    }

    pub fn contains(&self, step: &str) -> bool {
        self.steps.iter().any(|s| s == step)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The engine's `annotators` property: step names joined by `,`.
    pub fn annotators_property(&self) -> String {
        self.steps.join(",")
    }

    /// Override or add a prefixed option after compilation.
    pub fn set_option(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.options.insert(key.into(), value.into());
    }

    pub fn into_steps(self) -> Vec<String> {
        self.steps
    }

    pub fn into_options(self) -> BTreeMap<String, OptionValue> {
        self.options
    }
}

/// Depth-first flattening. `path` holds the names of the annotators currently
/// being expanded; meeting one of them again is a cycle.
fn flatten_steps(
    annotator: &Annotator,
    path: &mut Vec<String>,
) -> Result<Vec<String>, PipelineError> {
    path.push(annotator.name().to_string());

    let mut seen = HashSet::new();
    let mut steps = Vec::new();

    for dependency in annotator.dependencies() {
        if path.iter().any(|ancestor| ancestor == dependency.name()) {
            let mut cycle = path.clone();
            cycle.push(dependency.name().to_string());
            return Err(PipelineError::Cycle {
                step: dependency.name().to_string(),
                path: cycle,
            });
        }

        for step in flatten_steps(dependency, path)? {
            if seen.insert(step.clone()) {
                steps.push(step);
            }
        }
    }

    path.pop();
    steps.push(annotator.name().to_string());
    Ok(steps)
}

fn collect_options(annotator: &Annotator, merged: &mut BTreeMap<String, OptionValue>) {
    for dependency in annotator.dependencies() {
        collect_options(dependency, merged);
    }
    for (key, value) in annotator.options() {
        merged.insert(format!("{}.{}", annotator.name(), key), value.clone());
    }
}
