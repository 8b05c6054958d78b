// Derived-value calculators. Pure functions of their inputs: nothing here
// touches the database or the network. Invalid input yields `None`.

pub mod budget;
pub mod debt;
pub mod goals;
pub mod growth;
pub mod handlers;
pub mod insights;
pub mod scenarios;

/// True for finite numbers strictly above zero.
pub(crate) fn positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

/// True for finite numbers at or above zero.
pub(crate) fn non_negative(x: f64) -> bool {
    x.is_finite() && x >= 0.0
}

/// Rounds a month count up. `None` when it is not finite or does not fit in a `u32`.
pub(crate) fn ceil_months(months: f64) -> Option<u32> {
    let whole = months.ceil();
    if !whole.is_finite() || whole < 0.0 || whole > u32::MAX as f64 {
        return None;
    }
    Some(whole as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_months_rounds_up() {
        assert_eq!(ceil_months(22.1), Some(23));
        assert_eq!(ceil_months(12.0), Some(12));
    }

    #[test]
    fn test_ceil_months_rejects_unrepresentable_counts() {
        assert_eq!(ceil_months(1e14), None);
        assert_eq!(ceil_months(f64::INFINITY), None);
        assert_eq!(ceil_months(f64::NAN), None);
        assert_eq!(ceil_months(-1.0), None);
    }
}
