//! Date input parsing.

use crate::error::{CoreError, Result};
use chrono::NaiveDate;
use serde_json::Value;

/// Parse a date written strictly as `YYYY-MM-DD`.
///
/// # Errors
/// Returns `CoreError::InvalidDate` for any other shape or an impossible date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let invalid = || CoreError::InvalidDate(input.to_string());

    let bytes = input.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| invalid())
}

/// Conversion from the accepted date inputs: a date, or text in `YYYY-MM-DD` form.
pub trait IntoDate {
    /// Convert into a calendar date.
    ///
    /// # Errors
    /// `CoreError::InvalidDate` for malformed text, `CoreError::InvalidDateType`
    /// for inputs that are neither dates nor strings.
    fn into_date(self) -> Result<NaiveDate>;
}

impl IntoDate for NaiveDate {
    fn into_date(self) -> Result<NaiveDate> {
        Ok(self)
    }
}

impl IntoDate for &str {
    fn into_date(self) -> Result<NaiveDate> {
        parse_date(self)
    }
}

impl IntoDate for String {
    fn into_date(self) -> Result<NaiveDate> {
        parse_date(&self)
    }
}

impl IntoDate for &Value {
    fn into_date(self) -> Result<NaiveDate> {
        match self {
            Value::String(s) => parse_date(s),
            Value::Null => Err(CoreError::InvalidDateType("null".to_string())),
            Value::Bool(_) => Err(CoreError::InvalidDateType("boolean".to_string())),
            Value::Number(_) => Err(CoreError::InvalidDateType("number".to_string())),
            Value::Array(_) => Err(CoreError::InvalidDateType("array".to_string())),
            Value::Object(_) => Err(CoreError::InvalidDateType("object".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15"),
            Ok(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_parse_date_rejects_other_shapes() {
        for bad in ["2024-1-15", "15/01/2024", "2024-01-15T00:00", "", "2024-02-30", "yyyy-mm-dd"] {
            assert_eq!(
                parse_date(bad),
                Err(CoreError::InvalidDate(bad.to_string())),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_into_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(expected.into_date(), Ok(expected));
        assert_eq!("2024-03-01".into_date(), Ok(expected));
        assert_eq!("2024-03-01".to_string().into_date(), Ok(expected));
        assert_eq!((&json!("2024-03-01")).into_date(), Ok(expected));
    }

    #[test]
    fn test_into_date_rejects_wrong_kind() {
        assert_eq!(
            (&json!(20_240_301)).into_date(),
            Err(CoreError::InvalidDateType("number".to_string()))
        );
        assert!(matches!(
            (&json!({"year": 2024})).into_date(),
            Err(CoreError::InvalidDateType(_))
        ));
        assert!(matches!(
            (&json!("March 1st")).into_date(),
            Err(CoreError::InvalidDate(_))
        ));
    }
}
