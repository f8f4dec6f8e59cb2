use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AppraisalError;
use crate::projection::CashFlowSchedule;
use crate::types::{Irr, Money, Payback, Rate};
use crate::AppraisalResult;

const CONVERGENCE_THRESHOLD: Decimal = dec!(0.0000001);
const MAX_NEWTON_ITERATIONS: u32 = 100;
const MAX_BISECTION_ITERATIONS: u32 = 200;

/// The four capital-budgeting summary metrics for one appraisal run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetrics {
    pub npv: Money,
    pub irr: Irr,
    pub payback_period: Payback,
    pub discounted_payback_period: Payback,
}

/// Evaluate NPV, IRR, PP, and DPP over a projected schedule.
///
/// The discount rate must be strictly positive; callers that let a zero
/// or negative WACC through would be discounting against a degenerate
/// base, so that is rejected up front. IRR failure and non-recovering
/// paybacks are answers, not errors: the remaining metrics are always
/// produced.
pub fn evaluate_metrics(
    schedule: &CashFlowSchedule,
    wacc: Rate,
) -> AppraisalResult<ProjectMetrics> {
    if wacc <= Decimal::ZERO {
        return Err(AppraisalError::InvalidParameter {
            field: "wacc".into(),
            reason: "discount rate must be strictly positive".into(),
        });
    }

    let flows = schedule.full_cash_flows();
    if flows.len() < 2 {
        return Err(AppraisalError::InsufficientData(
            "appraisal requires the year-0 outlay and at least one operating year".into(),
        ));
    }

    let npv = npv(wacc, &flows)?;
    let irr = solve_irr(&flows);
    let payback_period = payback(&flows);
    let discounted_payback_period = payback(&discount_flows(wacc, &flows));

    Ok(ProjectMetrics {
        npv,
        irr,
        payback_period,
        discounted_payback_period,
    })
}

/// Net Present Value: direct discounted sum, year-0 flow undiscounted.
/// Uses iterative discount factors rather than powd.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> AppraisalResult<Money> {
    if rate <= dec!(-1) {
        return Err(AppraisalError::InvalidParameter {
            field: "rate".into(),
            reason: "discount rate must be greater than -100%".into(),
        });
    }

    let mut result = Decimal::ZERO;
    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount *= one_plus_r;
        }
        if discount.is_zero() {
            return Err(AppraisalError::DivisionByZero {
                context: format!("NPV discount factor at period {t}"),
            });
        }
        result += cf / discount;
    }

    Ok(result)
}

/// Internal Rate of Return over the full cash-flow vector.
///
/// Requires at least one sign change to exist; without one there is no
/// root and the search is not attempted. Newton-Raphson first, falling
/// back to bisection over a bracketing scan when Newton fails to
/// converge. Every failure mode resolves to [`Irr::NotComputable`].
pub fn solve_irr(cash_flows: &[Money]) -> Irr {
    if cash_flows.len() < 2 || !has_sign_change(cash_flows) {
        return Irr::NotComputable;
    }

    if let Some(rate) = newton_irr(cash_flows, dec!(0.10)) {
        return Irr::Rate(rate);
    }

    match bisect_irr(cash_flows) {
        Some(rate) => Irr::Rate(rate),
        None => Irr::NotComputable,
    }
}

/// A strictly negative flow followed by a later strictly positive one,
/// or the reverse.
fn has_sign_change(cash_flows: &[Money]) -> bool {
    let mut seen: Option<bool> = None;
    for cf in cash_flows {
        if cf.is_zero() {
            continue;
        }
        let positive = *cf > Decimal::ZERO;
        match seen {
            Some(prior) if prior != positive => return true,
            Some(_) => {}
            None => seen = Some(positive),
        }
    }
    false
}

fn newton_irr(cash_flows: &[Money], guess: Rate) -> Option<Rate> {
    let mut rate = guess;

    for _ in 0..MAX_NEWTON_ITERATIONS {
        let npv_val = npv_at(rate, cash_flows)?;
        let dnpv = npv_derivative_at(rate, cash_flows)?;

        if npv_val.abs() < CONVERGENCE_THRESHOLD {
            return Some(rate);
        }

        if dnpv.is_zero() {
            return None;
        }

        rate -= npv_val / dnpv;

        // Guard against divergence
        if rate < dec!(-0.99) {
            rate = dec!(-0.99);
        } else if rate > dec!(100.0) {
            rate = dec!(100.0);
        }
    }

    None
}

/// Bisection fallback: bracket the root by NPV sign, then halve.
/// Signs are compared directly so extreme endpoint NPVs cannot
/// overflow a product.
fn bisect_irr(cash_flows: &[Money]) -> Option<Rate> {
    let mut lo = dec!(-0.9);
    let mut hi = dec!(10.0);

    let mut f_lo = npv_at(lo, cash_flows)?;
    let mut f_hi = npv_at(hi, cash_flows)?;

    if !brackets_root(f_lo, f_hi) {
        // Widen the bracket once before giving up.
        hi = dec!(100.0);
        f_hi = npv_at(hi, cash_flows)?;
        if !brackets_root(f_lo, f_hi) {
            return None;
        }
    }

    for _ in 0..MAX_BISECTION_ITERATIONS {
        let mid = (lo + hi) / dec!(2);
        let f_mid = npv_at(mid, cash_flows)?;

        if f_mid.abs() < CONVERGENCE_THRESHOLD || (hi - lo).abs() < CONVERGENCE_THRESHOLD {
            return Some(mid);
        }

        if brackets_root(f_lo, f_mid) {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    None
}

/// The endpoint values straddle (or touch) zero.
fn brackets_root(f_lo: Decimal, f_hi: Decimal) -> bool {
    (f_lo <= Decimal::ZERO && f_hi >= Decimal::ZERO)
        || (f_lo >= Decimal::ZERO && f_hi <= Decimal::ZERO)
}

/// NPV for the solver. Checked arithmetic throughout: discount factors
/// that overflow Decimal make the remaining terms vanish, and a term
/// that overflows the sum fails the probe instead of panicking.
fn npv_at(rate: Rate, cash_flows: &[Money]) -> Option<Decimal> {
    let one_plus_r = Decimal::ONE + rate;
    if one_plus_r <= Decimal::ZERO {
        return None;
    }

    let mut result = Decimal::ZERO;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount = match discount.checked_mul(one_plus_r) {
                Some(d) if !d.is_zero() => d,
                _ => break,
            };
        }
        let term = cf.checked_div(discount)?;
        result = result.checked_add(term)?;
    }

    Some(result)
}

fn npv_derivative_at(rate: Rate, cash_flows: &[Money]) -> Option<Decimal> {
    let one_plus_r = Decimal::ONE + rate;
    if one_plus_r <= Decimal::ZERO {
        return None;
    }

    let mut dnpv = Decimal::ZERO;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount = match discount.checked_mul(one_plus_r) {
                Some(d) if !d.is_zero() => d,
                _ => break,
            };
            let t_dec = Decimal::from(t as i64);
            let numerator = t_dec.checked_mul(*cf)?;
            let term = numerator.checked_div(discount.checked_mul(one_plus_r)?)?;
            dnpv = dnpv.checked_sub(term)?;
        }
    }

    Some(dnpv)
}

/// Payback period over a cash-flow vector: the first index where the
/// cumulative sum reaches zero, with linear interpolation inside the
/// payback year. Applied to the raw vector for PP and the discounted
/// vector for DPP.
pub fn payback(cash_flows: &[Money]) -> Payback {
    let mut cumulative = Decimal::ZERO;

    for (y, cf) in cash_flows.iter().enumerate() {
        let prev = cumulative;
        cumulative += cf;

        if cumulative >= Decimal::ZERO {
            if y == 0 {
                return Payback::Years(Decimal::ZERO);
            }
            if cf.is_zero() {
                return Payback::Years(Decimal::from(y as u64));
            }
            let fraction = prev.abs() / cf;
            return Payback::Years(Decimal::from((y - 1) as u64) + fraction);
        }
    }

    Payback::NeverRecovers
}

/// Discount each flow by `(1+wacc)^t`. Factors that overflow Decimal
/// turn the remaining flows into zeros.
pub fn discount_flows(rate: Rate, cash_flows: &[Money]) -> Vec<Money> {
    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;
    let mut overflowed = false;

    cash_flows
        .iter()
        .enumerate()
        .map(|(t, cf)| {
            if t > 0 && !overflowed {
                match discount.checked_mul(one_plus_r) {
                    Some(d) if !d.is_zero() => discount = d,
                    _ => overflowed = true,
                }
            }
            if overflowed {
                Decimal::ZERO
            } else {
                cf / discount
            }
        })
        .collect()
}
