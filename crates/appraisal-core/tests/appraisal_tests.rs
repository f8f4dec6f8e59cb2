use appraisal_core::appraise::{appraise, appraise_text};
use appraisal_core::error::AppraisalError;
use appraisal_core::metrics::{evaluate_metrics, npv};
use appraisal_core::params::{ParameterSet, RawFigures};
use appraisal_core::projection::project_cash_flows;
use appraisal_core::types::{Irr, Payback};
use appraisal_core::upstream::FigureExtractor;
use appraisal_core::AppraisalResult;
use rust_decimal_macros::dec;

// ===========================================================================
// End-to-end reference scenario: 30bn outlay, 5-year life, 13% WACC
// ===========================================================================

fn reference_raw() -> RawFigures {
    RawFigures {
        initial_investment: dec!(30000000000),
        project_life_years: dec!(5),
        annual_revenue: dec!(15000000000),
        annual_operating_cost: dec!(6000000000),
        wacc: dec!(0.13),
        tax_rate: dec!(0.20),
    }
}

#[test]
fn test_reference_scenario_schedule() {
    let out = appraise(&reference_raw()).unwrap();
    let schedule = &out.result.schedule;

    assert_eq!(schedule.rows.len(), 5);
    for row in &schedule.rows {
        assert_eq!(row.depreciation, dec!(6000000000));
        assert_eq!(row.ebt, dec!(3000000000));
        assert_eq!(row.tax, dec!(600000000));
        assert_eq!(row.eat, dec!(2400000000));
        assert_eq!(row.net_cash_flow, dec!(8400000000));
    }
}

#[test]
fn test_reference_scenario_metrics() {
    let out = appraise(&reference_raw()).unwrap();
    let metrics = &out.result.metrics;

    // NPV = -30bn + 8.4bn * annuity(13%, 5y) ≈ -455.26m
    assert!(
        metrics.npv > dec!(-456000000) && metrics.npv < dec!(-454000000),
        "NPV should be ≈ -455.26m, got {}",
        metrics.npv
    );

    // IRR sits just below the 13% WACC (the project destroys value)
    let irr = metrics.irr.as_rate().expect("IRR should be computable");
    assert!(
        (irr - dec!(0.1238)).abs() < dec!(0.002),
        "IRR should be ≈ 12.38%, got {irr}"
    );
    assert!(irr < out.result.parameters.wacc);

    // Undiscounted recovery during year 4: 3 + 4.8/8.4
    let pp = metrics.payback_period.as_years().unwrap();
    assert!((pp - dec!(3.5714286)).abs() < dec!(0.0001), "PP was {pp}");

    // Discounted flows never sum back to the outlay within 5 years.
    assert_eq!(metrics.discounted_payback_period, Payback::NeverRecovers);
}

#[test]
fn test_npv_matches_direct_discounted_sum() {
    let mut warnings = Vec::new();
    let params = ParameterSet::normalize(&reference_raw(), &mut warnings).unwrap();
    let schedule = project_cash_flows(&params).unwrap();

    let metrics = evaluate_metrics(&schedule, params.wacc).unwrap();
    let direct = npv(params.wacc, &schedule.full_cash_flows()).unwrap();

    assert!(
        (metrics.npv - direct).abs() < dec!(0.000001),
        "engine NPV {} vs direct sum {direct}",
        metrics.npv
    );
}

// ===========================================================================
// §8 properties
// ===========================================================================

#[test]
fn test_evaluation_is_idempotent() {
    let a = appraise(&reference_raw()).unwrap();
    let b = appraise(&reference_raw()).unwrap();
    assert_eq!(a.result, b.result);
}

#[test]
fn test_all_positive_flows_have_no_irr() {
    // Zero outlay, positive operating flows: no sign change anywhere.
    let raw = RawFigures {
        initial_investment: dec!(0),
        ..reference_raw()
    };
    let out = appraise(&raw).unwrap();
    assert_eq!(out.result.metrics.irr, Irr::NotComputable);
    assert!(
        out.warnings.iter().any(|w| w.contains("IRR")),
        "expected an IRR warning, got {:?}",
        out.warnings
    );
    // The other metrics are still produced.
    assert!(out.result.metrics.npv > dec!(0));
    assert_eq!(out.result.metrics.payback_period, Payback::Years(dec!(0)));
}

#[test]
fn test_payback_boundary_is_exact() {
    let raw = RawFigures {
        initial_investment: dec!(1000),
        project_life_years: dec!(3),
        annual_revenue: dec!(1250),
        // tax 0 → CF = revenue - cost = 500/yr exactly
        annual_operating_cost: dec!(750),
        wacc: dec!(0.10),
        tax_rate: dec!(0),
    };
    let out = appraise(&raw).unwrap();
    assert_eq!(out.result.schedule.rows[0].net_cash_flow, dec!(500));
    assert_eq!(out.result.metrics.payback_period, Payback::Years(dec!(2.0)));
}

#[test]
fn test_short_horizon_never_recovers() {
    let raw = RawFigures {
        initial_investment: dec!(1000),
        project_life_years: dec!(2),
        annual_revenue: dec!(600),
        annual_operating_cost: dec!(500),
        // dep = 500, EBT = -400 → no tax → CF = 100/yr
        wacc: dec!(0.10),
        tax_rate: dec!(0.20),
    };
    let out = appraise(&raw).unwrap();
    assert_eq!(out.result.schedule.rows[0].net_cash_flow, dec!(100));
    assert_eq!(out.result.metrics.payback_period, Payback::NeverRecovers);
    assert_eq!(
        out.result.metrics.discounted_payback_period,
        Payback::NeverRecovers
    );
}

#[test]
fn test_zero_wacc_guard() {
    let raw = RawFigures {
        wacc: dec!(0),
        ..reference_raw()
    };
    let err = appraise(&raw).unwrap_err();
    assert!(matches!(
        err,
        AppraisalError::InvalidParameter { ref field, .. } if field == "wacc"
    ));
}

// ===========================================================================
// Upstream collaborator seams
// ===========================================================================

struct FixedExtractor(RawFigures);

impl FigureExtractor for FixedExtractor {
    fn extract(&self, _document_text: &str) -> AppraisalResult<RawFigures> {
        Ok(self.0.clone())
    }
}

struct FailingExtractor;

impl FigureExtractor for FailingExtractor {
    fn extract(&self, _document_text: &str) -> AppraisalResult<RawFigures> {
        Err(AppraisalError::Upstream {
            service: "extraction".into(),
            reason: "authentication failed".into(),
        })
    }
}

#[test]
fn test_appraise_text_runs_extraction_then_pipeline() {
    let extractor = FixedExtractor(reference_raw());
    let out = appraise_text(&extractor, "opaque plan text").unwrap();
    assert_eq!(out.result.schedule.rows.len(), 5);
}

#[test]
fn test_extractor_failure_surfaces_as_upstream_error() {
    let err = appraise_text(&FailingExtractor, "opaque plan text").unwrap_err();
    assert!(matches!(
        err,
        AppraisalError::Upstream { ref service, .. } if service == "extraction"
    ));
}
