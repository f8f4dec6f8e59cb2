use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::metrics::{evaluate_metrics, ProjectMetrics};
use crate::params::{ParameterSet, RawFigures};
use crate::projection::{project_cash_flows, CashFlowSchedule};
use crate::types::{with_metadata, ComputationOutput};
use crate::upstream::FigureExtractor;
use crate::AppraisalResult;

/// Everything one appraisal run produces: the normalized parameters it
/// ran with, the projected schedule, and the summary metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppraisalOutput {
    pub parameters: ParameterSet,
    pub schedule: CashFlowSchedule,
    pub metrics: ProjectMetrics,
}

/// Run the full pipeline: normalizes the raw figures, projects the
/// schedule, then evaluates the metrics.
///
/// A fresh run is a pure function of the raw figures; nothing is shared
/// or cached between invocations. Normalization warnings (percentage
/// rates, recovered project life) ride along in the envelope.
pub fn appraise(raw: &RawFigures) -> AppraisalResult<ComputationOutput<AppraisalOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let parameters = ParameterSet::normalize(raw, &mut warnings)?;
    let schedule = project_cash_flows(&parameters)?;
    let metrics = evaluate_metrics(&schedule, parameters.wacc)?;

    if metrics.irr.as_rate().is_none() {
        warnings.push(
            "IRR is not computable: the cash-flow vector never changes sign over the project life"
                .into(),
        );
    }

    let output = AppraisalOutput {
        parameters,
        schedule,
        metrics,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Uniform-cash-flow capital budgeting (NPV/IRR/PP/DPP, straight-line depreciation)",
        raw,
        warnings,
        elapsed,
        output,
    ))
}

/// Convenience entry point: run extraction on plan text, then appraise
/// whatever figures came back.
pub fn appraise_text(
    extractor: &dyn FigureExtractor,
    document_text: &str,
) -> AppraisalResult<ComputationOutput<AppraisalOutput>> {
    let raw = extractor.extract(document_text)?;
    appraise(&raw)
}
