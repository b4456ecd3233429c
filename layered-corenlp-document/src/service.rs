use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::connector::{AnnotationRequest, Connector};
use crate::error::DocumentResult;
use crate::expression::Expression;
use crate::hydrate::Annotated;
use crate::record::{DocumentRecord, ExpressionRecord};

/// Runs the configured pipeline against the engine and hydrates the result.
///
/// Each service owns its configuration and connector, so several services
/// with different languages can coexist.
#[derive(Debug, Clone)]
pub struct AnnotationService<C> {
    connector: C,
    config: PipelineConfig,
}

impl<C: Connector> AnnotationService<C> {
    pub fn new(connector: C, config: PipelineConfig) -> Self {
        Self { connector, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Compile, fetch, hydrate.
    ///
    /// The target's text is sent as-is. After hydration the target records
    /// the configured language. Requested steps that the response did not
    /// satisfy are logged and left unmarked.
    pub fn annotate<A: Annotated>(&self, target: &mut A) -> DocumentResult<()> {
        let pipeline = self.config.pipeline()?;
        let request = AnnotationRequest::new(
            target.annotable().text(),
            &pipeline,
            self.config.language,
        );

        debug!(
            annotators = %pipeline.annotators_property(),
            language = %self.config.language,
            "requesting annotation"
        );

        let response = self.connector.fetch(&request)?;
        let record: DocumentRecord = serde_json::from_value(response)?;
        target.hydrate(record)?;

        if let Some(iso) = self.config.language.iso2() {
            target.annotable_mut().set_language(iso);
        }

        for step in pipeline.steps() {
            if !target.annotable().has_annotator(step.as_str()) {
                warn!(step = %step, "requested step not satisfied by the response");
            }
        }

        Ok(())
    }

    /// Run the expression's pattern through its utility.
    ///
    /// The configured pipeline is sent along with the pattern as the
    /// `"<utility>.pattern"` option. Matches are hydrated into the expression
    /// and the configured language is recorded.
    pub fn annotate_expression(&self, expression: &mut Expression) -> DocumentResult<()> {
        let utility = expression.kind().utility();
        let mut pipeline = self.config.pipeline()?;
        pipeline.set_option(format!("{}.pattern", utility), expression.pattern());

        let request = AnnotationRequest::new(expression.text(), &pipeline, self.config.language)
            .with_utility(utility);

        debug!(
            utility,
            pattern = expression.pattern(),
            annotators = %pipeline.annotators_property(),
            "requesting expression matches"
        );

        let response = self.connector.fetch(&request)?;
        let record: ExpressionRecord = serde_json::from_value(response)?;
        expression.hydrate(record)?;

        if let Some(iso) = self.config.language.iso2() {
            expression.annotable_mut().set_language(iso);
        }

        if !expression.annotable().has_annotator(utility) {
            warn!(utility, "response carried no expression matches");
        }

        Ok(())
    }
}
