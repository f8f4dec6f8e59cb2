//! Seams for the external collaborators the appraisal pipeline consumes:
//! a text-to-figures extraction service and a natural-language narrative
//! service. The numeric engine never depends on either being available;
//! failures surface as [`crate::AppraisalError::Upstream`] and
//! timeout/retry policy belongs to the caller.

use crate::metrics::ProjectMetrics;
use crate::params::RawFigures;
use crate::types::Rate;
use crate::AppraisalResult;

/// Extracts the six appraisal figures from free-form business-plan text.
///
/// The document text is opaque to the core: it is forwarded as-is and
/// never parsed here. Implementations report 0 for figures they cannot
/// find; the pipeline re-validates everything regardless.
pub trait FigureExtractor {
    fn extract(&self, document_text: &str) -> AppraisalResult<RawFigures>;
}

/// Produces a free-form narrative assessment of computed metrics.
///
/// The response is opaque text; nothing downstream parses it.
pub trait NarrativeAnalyst {
    fn assess(&self, metrics: &ProjectMetrics, wacc: Rate) -> AppraisalResult<String>;
}
