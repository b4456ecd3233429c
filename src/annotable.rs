//! Tracking which annotation steps have been satisfied for a unit of text.
//!
//! Documents and sentences each own an [`Annotable`]. Hydration marks steps
//! as it discovers their data; accessors call [`Annotable::require`] before
//! handing anything out, so reading data that was never produced fails
//! instead of returning an empty value.

use std::collections::BTreeSet;

use crate::annotator::Step;
use crate::error::AccessError;

/// Raw text plus the set of satisfied step names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotable {
    text: String,
    /// ISO 639-1 code of the language the text was annotated in
    language: Option<String>,
    annotators: BTreeSet<String>,
}

impl Annotable {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            annotators: BTreeSet::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn set_language(&mut self, iso: impl Into<String>) {
        self.language = Some(iso.into());
    }

    /// Mark a step as satisfied. Marking twice has no further effect.
    pub fn add_annotator<S: Step + ?Sized>(&mut self, step: &S) {
        if !self.annotators.contains(step.name()) {
            self.annotators.insert(step.name().to_string());
        }
    }

    pub fn add_annotators<I>(&mut self, steps: I)
    where
        I: IntoIterator,
        I::Item: Step,
    {
        for step in steps {
            self.add_annotator(&step);
        }
    }

    pub fn remove_annotator<S: Step + ?Sized>(&mut self, step: &S) {
        self.annotators.remove(step.name());
    }

    pub fn has_annotator<S: Step + ?Sized>(&self, step: &S) -> bool {
        self.annotators.contains(step.name())
    }

    /// True when at least one of `steps` is satisfied.
    pub fn has_any_annotator<I>(&self, steps: I) -> bool
    where
        I: IntoIterator,
        I::Item: Step,
    {
        steps
            .into_iter()
            .any(|step| self.annotators.contains(step.name()))
    }

    /// Satisfied step names, sorted.
    pub fn annotators(&self) -> impl Iterator<Item = &str> {
        self.annotators.iter().map(String::as_str)
    }

    /// Guard for accessors: `what` names the data being read.
    pub fn require(&self, step: &str, what: &'static str) -> Result<(), AccessError> {
        if self.annotators.contains(step) {
            Ok(())
        } else {
            Err(AccessError::MissingAnnotator {
                what,
                step: step.to_string(),
            })
        }
    }

    /// Guard satisfied by any one of several interchangeable steps.
    pub fn require_any(&self, steps: &[&str], what: &'static str) -> Result<(), AccessError> {
        if self.has_any_annotator(steps) {
            Ok(())
        } else {
            Err(AccessError::MissingAnnotator {
                what,
                step: steps.join("|"),
            })
        }
    }
}

/// Bounds-checked indexing with an [`AccessError`] naming the collection.
pub fn nth<'a, T>(items: &'a [T], index: usize, what: &'static str) -> Result<&'a T, AccessError> {
    items.get(index).ok_or(AccessError::IndexOutOfRange {
        what,
        index,
        len: items.len(),
    })
}
