use crate::data::models::stock::{
    StockAmount, StockLine, StockOperation, StockOperationItem, StockOperationKind,
    UpdateStockOperation,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct StockItemRequest {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub size_id: i32,
    #[validate(range(min = 1))]
    pub amount: i32,
}

#[derive(Deserialize, Validate, Debug, Clone)]
#[validate(schema(function = "validate_line_totals"))]
pub struct StockOperationRequest {
    #[serde(rename = "type")]
    pub kind: StockOperationKind,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub items: Vec<StockItemRequest>,
}

fn validate_line_totals(request: &StockOperationRequest) -> Result<(), ValidationError> {
    match request.lines() {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("amount_overflow")),
    }
}

impl StockOperationRequest {
    /// Items with repeated pairs merged; `None` when a merged amount overflows.
    pub fn lines(&self) -> Option<Vec<StockLine>> {
        StockLine::merge(
            self.items
                .iter()
                .map(|item| StockLine {
                    product_id: item.product_id,
                    size_id: item.size_id,
                    amount: item.amount,
                })
                .collect(),
        )
    }
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct UpdateStockOperationRequest {
    pub date: NaiveDate,
    pub canceled: bool,
}

impl From<UpdateStockOperationRequest> for UpdateStockOperation {
    fn from(request: UpdateStockOperationRequest) -> Self {
        Self {
            date: request.date,
            canceled: request.canceled,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StockItemDTO {
    pub product_id: i32,
    pub size_id: i32,
    pub amount: i32,
}

impl From<StockOperationItem> for StockItemDTO {
    fn from(item: StockOperationItem) -> Self {
        Self {
            product_id: item.product_id,
            size_id: item.size_id,
            amount: item.amount,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StockOperationDTO {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: NaiveDate,
    pub user_id: i32,
    pub canceled: bool,
    pub sale_id: Option<i32>,
    pub items: Vec<StockItemDTO>,
}

impl StockOperationDTO {
    pub fn with_items(operation: StockOperation, items: Vec<StockOperationItem>) -> Self {
        Self {
            id: operation.id,
            kind: operation.kind,
            date: operation.date,
            user_id: operation.user_id,
            canceled: operation.canceled,
            sale_id: operation.sale_id,
            items: items.into_iter().map(StockItemDTO::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StockAmountDTO {
    pub id: i32,
    pub product_id: i32,
    pub size_id: i32,
    pub amount: i32,
}

impl From<StockAmount> for StockAmountDTO {
    fn from(amount: StockAmount) -> Self {
        Self {
            id: amount.id,
            product_id: amount.product_id,
            size_id: amount.size_id,
            amount: amount.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_item_list_fails_validation() {
        let request: StockOperationRequest =
            serde_json::from_value(json!({ "type": "entry", "items": [] })).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn zero_amount_fails_validation() {
        let request: StockOperationRequest = serde_json::from_value(json!({
            "type": "exit",
            "items": [{ "product_id": 1, "size_id": 1, "amount": 0 }]
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn repeated_pairs_are_merged_into_one_line() {
        let request: StockOperationRequest = serde_json::from_value(json!({
            "type": "entry",
            "items": [
                { "product_id": 1, "size_id": 1, "amount": 2 },
                { "product_id": 1, "size_id": 1, "amount": 3 }
            ]
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let lines = request.lines().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].amount, 5);
    }

    #[test]
    fn merged_amount_past_i32_fails_validation() {
        let request: StockOperationRequest = serde_json::from_value(json!({
            "type": "entry",
            "items": [
                { "product_id": 1, "size_id": 1, "amount": 2147483647 },
                { "product_id": 1, "size_id": 1, "amount": 1 }
            ]
        }))
        .unwrap();

        assert!(request.lines().is_none());
        assert!(request.validate().is_err());
    }
}
