//! Input checks shared by the CRUD handlers. Each returns `AppError::Validation`
//! naming the offending field.

use chrono::NaiveDate;

use crate::errors::AppError;

pub fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

pub fn require_positive(field: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::Validation(format!(
            "{field} must be a positive number"
        )));
    }
    Ok(())
}

pub fn require_non_negative(field: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::Validation(format!(
            "{field} must be zero or a positive number"
        )));
    }
    Ok(())
}

pub fn optional_non_negative(field: &str, value: Option<f64>) -> Result<(), AppError> {
    value.map_or(Ok(()), |v| require_non_negative(field, v))
}

pub fn optional_positive(field: &str, value: Option<f64>) -> Result<(), AppError> {
    value.map_or(Ok(()), |v| require_positive(field, v))
}

pub fn optional_text(field: &str, value: Option<&str>) -> Result<(), AppError> {
    value.map_or(Ok(()), |v| require_text(field, v))
}

/// Credit scores on the 300–900 scale.
pub fn optional_credit_score(value: Option<i32>) -> Result<(), AppError> {
    match value {
        Some(score) if !(300..=900).contains(&score) => Err(AppError::Validation(
            "credit_score must be between 300 and 900".to_string(),
        )),
        _ => Ok(()),
    }
}

/// `YYYY-MM`, e.g. `2026-04`.
pub fn require_month(value: &str) -> Result<(), AppError> {
    let valid = value.len() == 7
        && NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").is_ok();
    if !valid {
        return Err(AppError::Validation(format!(
            "month_year must be formatted YYYY-MM, got '{value}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_rejects_whitespace() {
        assert!(require_text("name", "  ").is_err());
        assert!(require_text("name", "Groceries").is_ok());
    }

    #[test]
    fn test_positive_and_non_negative() {
        assert!(require_positive("amount", 0.0).is_err());
        assert!(require_positive("amount", f64::NAN).is_err());
        assert!(require_positive("amount", 1.5).is_ok());
        assert!(require_non_negative("spent", 0.0).is_ok());
        assert!(require_non_negative("spent", -0.01).is_err());
        assert!(optional_non_negative("spent", None).is_ok());
    }

    #[test]
    fn test_credit_score_range() {
        assert!(optional_credit_score(Some(299)).is_err());
        assert!(optional_credit_score(Some(750)).is_ok());
        assert!(optional_credit_score(None).is_ok());
    }

    #[test]
    fn test_month_format() {
        assert!(require_month("2026-04").is_ok());
        assert!(require_month("2026-13").is_err());
        assert!(require_month("2026-4").is_err());
        assert!(require_month("April").is_err());
    }

    #[test]
    fn test_error_names_field() {
        match require_positive("target_amount", -1.0) {
            Err(AppError::Validation(msg)) => assert!(msg.starts_with("target_amount")),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
