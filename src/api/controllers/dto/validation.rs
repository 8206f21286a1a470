use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use validator::ValidationError;

pub fn positive_decimal(value: &BigDecimal) -> Result<(), ValidationError> {
    if *value > BigDecimal::zero() {
        Ok(())
    } else {
        Err(ValidationError::new("positive"))
    }
}

pub fn date_window(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), ValidationError> {
    match end {
        Some(end) if end < start => Err(ValidationError::new("date_window")),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn zero_and_negative_are_rejected() {
        assert!(positive_decimal(&BigDecimal::from_str("0.01").unwrap()).is_ok());
        assert!(positive_decimal(&BigDecimal::zero()).is_err());
        assert!(positive_decimal(&BigDecimal::from(-3)).is_err());
    }

    #[test]
    fn end_may_equal_start() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(date_window(day, Some(day)).is_ok());
        assert!(date_window(day, None).is_ok());
        assert!(date_window(day, day.pred_opt()).is_err());
    }
}
