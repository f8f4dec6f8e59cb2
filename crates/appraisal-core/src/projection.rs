use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppraisalError;
use crate::params::ParameterSet;
use crate::types::Money;
use crate::AppraisalResult;

/// One operating year of the projected cash-flow table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowRow {
    pub year: u32,
    pub revenue: Money,
    pub operating_cost: Money,
    pub depreciation: Money,
    pub ebt: Money,
    pub tax: Money,
    pub eat: Money,
    pub net_cash_flow: Money,
}

/// Year-by-year cash-flow schedule for years 1..=N, with the year-0
/// outlay held separately. Owned by the evaluation run that built it and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    pub initial_investment: Money,
    pub rows: Vec<CashFlowRow>,
}

impl CashFlowSchedule {
    /// The full cash-flow vector `[-C0, CF_1, ..., CF_N]`.
    pub fn full_cash_flows(&self) -> Vec<Money> {
        let mut flows = Vec::with_capacity(self.rows.len() + 1);
        flows.push(-self.initial_investment);
        flows.extend(self.rows.iter().map(|r| r.net_cash_flow));
        flows
    }
}

/// Project the cash-flow schedule for a parameter set.
///
/// Straight-line depreciation over the project life; tax is charged on
/// positive EBT only (a loss year earns no tax benefit — the model's
/// documented policy, not an oversight). Annual revenue and cost are
/// assumed constant, so every row is identical apart from the year.
pub fn project_cash_flows(params: &ParameterSet) -> AppraisalResult<CashFlowSchedule> {
    if params.project_life < 1 {
        return Err(AppraisalError::InvalidParameter {
            field: "project_life".into(),
            reason: "project life must be at least one year".into(),
        });
    }
    if params.initial_investment < Decimal::ZERO {
        return Err(AppraisalError::InvalidParameter {
            field: "initial_investment".into(),
            reason: "capital outlay cannot be negative".into(),
        });
    }

    let depreciation = params.initial_investment / Decimal::from(params.project_life);
    let ebt = params.annual_revenue - params.annual_cost - depreciation;
    let tax = if ebt > Decimal::ZERO {
        ebt * params.tax_rate
    } else {
        Decimal::ZERO
    };
    let eat = ebt - tax;
    let net_cash_flow = eat + depreciation;

    let rows = (1..=params.project_life)
        .map(|year| CashFlowRow {
            year,
            revenue: params.annual_revenue,
            operating_cost: params.annual_cost,
            depreciation,
            ebt,
            tax,
            eat,
            net_cash_flow,
        })
        .collect();

    Ok(CashFlowSchedule {
        initial_investment: params.initial_investment,
        rows,
    })
}
