//! Internal Rate of Return (IRR) on annual equity cash flows
//!
//! Complements the multiple-based IRR estimate with a rate that accounts for
//! when each distribution arrives.

use super::cashflows::YearProjection;

const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 1000;
const MIN_RATE: f64 = -0.99;
const MAX_RATE: f64 = 10.0;

/// Build the equity stream for a hold: the investment at t=0, each year's cash
/// flow, and the sale proceeds added to the final year.
pub fn equity_cash_flows(
    equity_invested: f64,
    held: &[YearProjection],
    sale_proceeds: f64,
) -> Vec<f64> {
    let mut flows = Vec::with_capacity(held.len() + 1);
    flows.push(-equity_invested);
    flows.extend(held.iter().map(|p| p.cash_flow));
    if !held.is_empty() {
        if let Some(last) = flows.last_mut() {
            *last += sale_proceeds;
        }
    }
    flows
}

/// Calculate the annual IRR of a series of cash flows using Newton-Raphson,
/// falling back to bisection.
///
/// # Arguments
/// * `cashflows` - Annual cash flows, t=0 first (positive = inflow, negative = outflow)
///
/// # Returns
/// * `Option<f64>` - IRR as a decimal (e.g., 0.05 for 5%), or None if no solution found
pub fn calculate_irr(cashflows: &[f64]) -> Option<f64> {
    if cashflows.is_empty() || cashflows.iter().any(|cf| !cf.is_finite()) {
        return None;
    }

    if cashflows.iter().all(|&cf| cf.abs() < TOLERANCE) {
        return Some(0.0);
    }

    // A root requires at least one sign change
    let has_positive = cashflows.iter().any(|&cf| cf > TOLERANCE);
    let has_negative = cashflows.iter().any(|&cf| cf < -TOLERANCE);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = 0.10;

    for _ in 0..MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 {
            return irr_bisection(cashflows);
        }

        let next = (rate - npv / dnpv).clamp(MIN_RATE, MAX_RATE);

        if (next - rate).abs() < TOLERANCE {
            return Some(next);
        }

        rate = next;
    }

    irr_bisection(cashflows)
}

/// NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

fn irr_bisection(cashflows: &[f64]) -> Option<f64> {
    let mut low = MIN_RATE;
    let mut high = MAX_RATE;

    if npv_at_rate(cashflows, low) * npv_at_rate(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_at_rate(cashflows, low) < 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    None
}

fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}
