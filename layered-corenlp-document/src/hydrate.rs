use layered_corenlp::Annotable;

use crate::error::DocumentError;
use crate::record::DocumentRecord;

/// A unit of text that can be filled from an engine response.
///
/// Hydration marks a step on the [`Annotable`] exactly when the record
/// carries that step's field family. Hydrating the same record twice leaves
/// the value unchanged.
pub trait Annotated {
    fn annotable(&self) -> &Annotable;

    fn annotable_mut(&mut self) -> &mut Annotable;

    fn hydrate(&mut self, record: DocumentRecord) -> Result<(), DocumentError>;
}
