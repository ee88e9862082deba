//! Present-value primitives for the savings projections.

/// Tolerance for treating growth and discount rates as equal.
///
/// Exactly 1e-9: a wider tolerance would substitute the degenerate
/// formula in valid generic cases.
const RATE_EQUALITY_TOLERANCE: f64 = 1e-9;

/// Discount a single cash flow from a future year to present value.
///
/// Engine call sites always pass `year_index >= 1`; year 0 returns the
/// cash flow unchanged.
pub fn present_value(cash_flow: f64, discount_rate: f64, year_index: u32) -> f64 {
    cash_flow / (1.0 + discount_rate).powi(year_index as i32)
}

/// Present value of a stream of `periods` payments starting at `cash_flow`
/// and growing at `growth_rate` each subsequent period.
///
/// When the growth and discount rates coincide the generic closed form
/// divides by zero, so the degenerate form is used instead.
pub fn present_value_of_growing_annuity(
    cash_flow: f64,
    growth_rate: f64,
    discount_rate: f64,
    periods: u32,
) -> f64 {
    let discounted = (1.0 + discount_rate).powi(periods as i32);
    if (growth_rate - discount_rate).abs() < RATE_EQUALITY_TOLERANCE {
        cash_flow * periods as f64 / discounted
    } else {
        let grown = (1.0 + growth_rate).powi(periods as i32);
        cash_flow * ((grown - discounted) / (growth_rate - discount_rate)) / discounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_present_value_year_zero_is_identity() {
        assert!((present_value(1000.0, 0.1095, 0) - 1000.0).abs() < EPS);
    }

    #[test]
    fn test_present_value_single_year() {
        // 1000 discounted one year at 10% is 909.0909...
        let pv = present_value(1000.0, 0.10, 1);
        assert!((pv - 1000.0 / 1.10).abs() < EPS);
    }

    #[test]
    fn test_present_value_decreases_with_year() {
        let pv1 = present_value(500.0, 0.1095, 1);
        let pv5 = present_value(500.0, 0.1095, 5);
        assert!(pv5 < pv1);
    }

    #[test]
    fn test_growing_annuity_generic_matches_year_by_year_sum() {
        let cash_flow = 1200.0;
        let growth: f64 = 0.09;
        let discount = 0.1095;
        let periods = 5;

        // First payment lands at the end of year 1
        let mut expected = 0.0;
        for i in 0..periods {
            let payment = cash_flow * (1.0 + growth).powi(i as i32);
            expected += present_value(payment, discount, i + 1);
        }

        let pv = present_value_of_growing_annuity(cash_flow, growth, discount, periods);
        assert!((pv - expected).abs() < 1e-6);
    }

    #[test]
    fn test_growing_annuity_degenerate_when_rates_equal() {
        let cash_flow = 1200.0;
        let rate: f64 = 0.09;
        let periods = 5;

        let pv = present_value_of_growing_annuity(cash_flow, rate, rate, periods);
        let expected = cash_flow * periods as f64 / (1.0 + rate).powi(periods as i32);
        assert!((pv - expected).abs() < EPS);
    }

    #[test]
    fn test_growing_annuity_degenerate_within_tolerance() {
        let cash_flow = 1200.0;
        let rate: f64 = 0.09;
        let periods = 5;

        let degenerate = present_value_of_growing_annuity(cash_flow, rate, rate, periods);
        let nudged =
            present_value_of_growing_annuity(cash_flow, rate + 1e-10, rate, periods);
        assert!((nudged - degenerate).abs() < EPS);
    }

    #[test]
    fn test_growing_annuity_generic_just_outside_tolerance() {
        let cash_flow = 1200.0;
        let rate: f64 = 0.09;
        let periods = 5;

        // A gap of 1e-8 must take the generic path, which stays close to
        // the degenerate value but is not produced by the same formula.
        let pv = present_value_of_growing_annuity(cash_flow, rate + 1e-8, rate, periods);
        let mut expected = 0.0;
        for i in 0..periods {
            let payment = cash_flow * (1.0 + rate + 1e-8).powi(i as i32);
            expected += present_value(payment, rate, i + 1);
        }
        assert!((pv - expected).abs() < 1e-4);
    }

    #[test]
    fn test_growing_annuity_zero_growth_is_ordinary_annuity() {
        let cash_flow = 1000.0;
        let discount = 0.10;
        let periods = 3;

        let pv = present_value_of_growing_annuity(cash_flow, 0.0, discount, periods);
        let expected = present_value(cash_flow, discount, 1)
            + present_value(cash_flow, discount, 2)
            + present_value(cash_flow, discount, 3);
        assert!((pv - expected).abs() < 1e-6);
    }
}
