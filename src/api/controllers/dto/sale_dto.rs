use crate::data::models::sale::{Sale, SaleItem, SaleStatus};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct SaleItemRequest {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub size_id: i32,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Deserialize, Validate, Debug, Clone)]
#[validate(schema(function = "validate_quantities"))]
pub struct SaleRequest {
    #[validate(range(min = 1))]
    pub customer_id: i32,
    #[validate(range(min = 1))]
    pub coupon_id: Option<i32>,
    #[validate(length(min = 1, max = 50))]
    pub payment_method: String,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub items: Vec<SaleItemRequest>,
}

fn validate_quantities(request: &SaleRequest) -> Result<(), ValidationError> {
    match request.quantities() {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("quantity_overflow")),
    }
}

impl SaleRequest {
    /// `(product_id, size_id, quantity)` with repeated pairs summed. `None`
    /// when a summed quantity overflows.
    pub fn quantities(&self) -> Option<Vec<(i32, i32, i32)>> {
        let mut merged: Vec<(i32, i32, i32)> = Vec::with_capacity(self.items.len());
        for item in &self.items {
            match merged
                .iter_mut()
                .find(|(p, s, _)| *p == item.product_id && *s == item.size_id)
            {
                Some((_, _, quantity)) => *quantity = quantity.checked_add(item.quantity)?,
                None => merged.push((item.product_id, item.size_id, item.quantity)),
            }
        }
        Some(merged)
    }
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct UpdateSaleRequest {
    pub status: SaleStatus,
    #[validate(length(min = 1, max = 50))]
    pub payment_method: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SaleItemDTO {
    pub product_id: i32,
    pub size_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl From<SaleItem> for SaleItemDTO {
    fn from(item: SaleItem) -> Self {
        Self {
            product_id: item.product_id,
            size_id: item.size_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SaleDTO {
    pub id: i32,
    pub customer_id: i32,
    pub status: String,
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub total: BigDecimal,
    pub coupon_id: Option<i32>,
    pub payment_method: String,
    pub date: NaiveDate,
    pub items: Vec<SaleItemDTO>,
}

impl SaleDTO {
    pub fn with_items(sale: Sale, items: Vec<SaleItem>) -> Self {
        Self {
            id: sale.id,
            customer_id: sale.customer_id,
            status: sale.status,
            subtotal: sale.subtotal,
            discount: sale.discount,
            total: sale.total,
            coupon_id: sale.coupon_id,
            payment_method: sale.payment_method,
            date: sale.date,
            items: items.into_iter().map(SaleItemDTO::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_status_does_not_deserialize() {
        let parsed = serde_json::from_value::<UpdateSaleRequest>(
            json!({ "status": "shipped", "payment_method": "cash" }),
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn quantities_merge_repeated_pairs() {
        let request: SaleRequest = serde_json::from_value(json!({
            "customer_id": 1,
            "payment_method": "pix",
            "items": [
                { "product_id": 1, "size_id": 2, "quantity": 1 },
                { "product_id": 3, "size_id": 2, "quantity": 4 },
                { "product_id": 1, "size_id": 2, "quantity": 2 }
            ]
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.quantities(), Some(vec![(1, 2, 3), (3, 2, 4)]));
    }

    #[test]
    fn summed_quantity_past_i32_fails_validation() {
        let request: SaleRequest = serde_json::from_value(json!({
            "customer_id": 1,
            "payment_method": "pix",
            "items": [
                { "product_id": 1, "size_id": 2, "quantity": 2147483647 },
                { "product_id": 1, "size_id": 2, "quantity": 1 }
            ]
        }))
        .unwrap();

        assert_eq!(request.quantities(), None);
        assert!(request.validate().is_err());
    }
}
