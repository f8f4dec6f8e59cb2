use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppraisalError;
use crate::types::{Money, Rate};
use crate::AppraisalResult;

/// The six figures the extraction collaborator reports for a business
/// plan. The extractor uses 0 as its "not found" sentinel, so every
/// field defaults to zero and validation happens downstream in
/// [`ParameterSet::normalize`] rather than being trusted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFigures {
    #[serde(default)]
    pub initial_investment: Decimal,
    #[serde(default)]
    pub project_life_years: Decimal,
    #[serde(default)]
    pub annual_revenue: Decimal,
    #[serde(default)]
    pub annual_operating_cost: Decimal,
    #[serde(default)]
    pub wacc: Decimal,
    #[serde(default)]
    pub tax_rate: Decimal,
}

/// Coerce a loose JSON mapping into [`RawFigures`].
///
/// Extractor responses arrive as JSON whose values may be numbers or
/// numeric strings. Missing or null fields fall back to the upstream
/// zero sentinel; anything non-numeric is rejected with the offending
/// field named.
pub fn raw_figures_from_json(value: &Value) -> AppraisalResult<RawFigures> {
    let map = value
        .as_object()
        .ok_or_else(|| AppraisalError::InvalidParameter {
            field: "figures".into(),
            reason: "expected a JSON object of extracted figures".into(),
        })?;

    Ok(RawFigures {
        initial_investment: coerce_field(map, "initial_investment")?,
        project_life_years: coerce_field(map, "project_life_years")?,
        annual_revenue: coerce_field(map, "annual_revenue")?,
        annual_operating_cost: coerce_field(map, "annual_operating_cost")?,
        wacc: coerce_field(map, "wacc")?,
        tax_rate: coerce_field(map, "tax_rate")?,
    })
}

fn coerce_field(map: &serde_json::Map<String, Value>, field: &str) -> AppraisalResult<Decimal> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(Decimal::ZERO),
        Some(Value::Number(n)) => {
            Decimal::from_str(&n.to_string()).map_err(|e| AppraisalError::InvalidParameter {
                field: field.into(),
                reason: format!("not representable as a decimal: {e}"),
            })
        }
        Some(Value::String(s)) => {
            let cleaned = s.trim().replace(',', "");
            Decimal::from_str(&cleaned).map_err(|_| AppraisalError::InvalidParameter {
                field: field.into(),
                reason: format!("non-numeric value '{s}'"),
            })
        }
        Some(other) => Err(AppraisalError::InvalidParameter {
            field: field.into(),
            reason: format!("expected a number, got {other}"),
        }),
    }
}

/// Validated, normalized inputs for one appraisal run. Constructed once
/// per evaluation cycle and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub initial_investment: Money,
    pub project_life: u32,
    pub annual_revenue: Money,
    pub annual_cost: Money,
    pub wacc: Rate,
    pub tax_rate: Rate,
}

impl ParameterSet {
    /// Validate and normalize raw extracted figures.
    ///
    /// Rates given as plain percentages (>1, ≤100) are divided by 100;
    /// rates above 100 are passed through with a warning for the caller
    /// to flag. A non-positive project life is recoverable: it is
    /// replaced by 1 with a warning rather than aborting the pipeline.
    /// A negative investment is not recoverable.
    pub fn normalize(raw: &RawFigures, warnings: &mut Vec<String>) -> AppraisalResult<Self> {
        if raw.initial_investment < Decimal::ZERO {
            return Err(AppraisalError::InvalidParameter {
                field: "initial_investment".into(),
                reason: "capital outlay cannot be negative".into(),
            });
        }

        let life_raw =
            raw.project_life_years
                .trunc()
                .to_i64()
                .ok_or_else(|| AppraisalError::InvalidParameter {
                    field: "project_life_years".into(),
                    reason: "not representable as an integer year count".into(),
                })?;
        let project_life = if life_raw <= 0 {
            warnings.push(format!(
                "project_life_years was {life_raw}; must be a positive integer, proceeding with 1"
            ));
            1
        } else {
            life_raw as u32
        };

        let wacc = normalize_rate(raw.wacc, "wacc", warnings);
        let tax_rate = normalize_rate(raw.tax_rate, "tax_rate", warnings);

        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(AppraisalError::InvalidParameter {
                field: "tax_rate".into(),
                reason: format!("must lie in [0, 1] after normalization, got {tax_rate}"),
            });
        }

        Ok(ParameterSet {
            initial_investment: raw.initial_investment,
            project_life,
            annual_revenue: raw.annual_revenue,
            annual_cost: raw.annual_operating_cost,
            wacc,
            tax_rate,
        })
    }
}

/// Treat a plain percentage as a percentage: 13 means 13%, 0.13 stays
/// 0.13. Values above 100 are left untouched for the caller to flag.
fn normalize_rate(value: Decimal, field: &str, warnings: &mut Vec<String>) -> Rate {
    if value > Decimal::ONE && value <= Decimal::ONE_HUNDRED {
        let normalized = value / Decimal::ONE_HUNDRED;
        warnings.push(format!(
            "{field} given as a percentage ({value}); normalized to {normalized}"
        ));
        normalized
    } else {
        if value > Decimal::ONE_HUNDRED {
            warnings.push(format!("{field} of {value} exceeds 100; left as-is"));
        }
        value
    }
}
