use crate::api::controllers::dto::validation::{date_window, positive_decimal};
use crate::data::models::coupon::{Coupon, CouponKind, NewCoupon, UpdateCoupon};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Deserialize, Validate, Debug, Clone)]
#[validate(schema(function = "validate_coupon"))]
pub struct CouponRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CouponKind,
    #[validate(custom(function = "positive_decimal"))]
    pub value: BigDecimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub use_limit: Option<i32>,
    #[serde(default)]
    pub product_ids: Vec<i32>,
}

fn validate_coupon(request: &CouponRequest) -> Result<(), ValidationError> {
    if request.kind == CouponKind::Percentage && request.value > BigDecimal::from(100) {
        return Err(ValidationError::new("percentage"));
    }

    date_window(request.start_date, request.end_date)
}

impl CouponRequest {
    pub fn distinct_product_ids(&self) -> Vec<i32> {
        let mut ids = Vec::with_capacity(self.product_ids.len());
        for id in &self.product_ids {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CouponDTO {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: BigDecimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub use_limit: Option<i32>,
    pub uses: i32,
    pub product_ids: Vec<i32>,
}

impl CouponDTO {
    pub fn with_products(coupon: Coupon, product_ids: Vec<i32>) -> Self {
        Self {
            id: coupon.id,
            name: coupon.name,
            kind: coupon.kind,
            value: coupon.value,
            start_date: coupon.start_date,
            end_date: coupon.end_date,
            use_limit: coupon.use_limit,
            uses: coupon.uses,
            product_ids,
        }
    }
}

impl From<CouponRequest> for NewCoupon {
    fn from(request: CouponRequest) -> Self {
        Self {
            name: request.name,
            kind: request.kind.as_str().to_string(),
            value: request.value,
            start_date: request.start_date,
            end_date: request.end_date,
            use_limit: request.use_limit,
        }
    }
}

impl From<CouponRequest> for UpdateCoupon {
    fn from(request: CouponRequest) -> Self {
        Self {
            name: request.name,
            kind: request.kind.as_str().to_string(),
            value: request.value,
            start_date: request.start_date,
            end_date: request.end_date,
            use_limit: request.use_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(kind: &str, value: f64, end: &str) -> CouponRequest {
        serde_json::from_value(json!({
            "name": "SUMMER",
            "type": kind,
            "value": value,
            "start_date": "2024-06-01",
            "end_date": end,
        }))
        .unwrap()
    }

    #[test]
    fn percentage_above_hundred_fails() {
        assert!(request("percentage", 100.0, "2024-06-30").validate().is_ok());
        assert!(request("percentage", 150.0, "2024-06-30").validate().is_err());
        assert!(request("value", 150.0, "2024-06-30").validate().is_ok());
    }

    #[test]
    fn end_before_start_fails() {
        assert!(request("value", 5.0, "2024-05-31").validate().is_err());
    }

    #[test]
    fn unknown_type_does_not_deserialize() {
        let parsed = serde_json::from_value::<CouponRequest>(json!({
            "name": "X", "type": "bogus", "value": 1, "start_date": "2024-06-01"
        }));
        assert!(parsed.is_err());
    }
}
