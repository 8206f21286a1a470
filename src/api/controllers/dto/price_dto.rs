use crate::api::controllers::dto::validation::{date_window, positive_decimal};
use crate::data::models::price::{NewProductPrice, ProductPrice, UpdateProductPrice};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Deserialize, Validate, Debug, Clone)]
#[validate(schema(function = "validate_price_window"))]
pub struct PriceRequest {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub size_id: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[validate(custom(function = "positive_decimal"))]
    pub price: BigDecimal,
}

fn validate_price_window(request: &PriceRequest) -> Result<(), ValidationError> {
    date_window(request.start_date, request.end_date)
}

#[derive(Deserialize, Debug, Default)]
pub struct PriceQuery {
    pub product_id: Option<i32>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PriceDTO {
    pub id: i32,
    pub product_id: i32,
    pub size_id: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub price: BigDecimal,
}

impl From<ProductPrice> for PriceDTO {
    fn from(price: ProductPrice) -> Self {
        Self {
            id: price.id,
            product_id: price.product_id,
            size_id: price.size_id,
            start_date: price.start_date,
            end_date: price.end_date,
            price: price.price,
        }
    }
}

impl From<PriceRequest> for NewProductPrice {
    fn from(request: PriceRequest) -> Self {
        Self {
            product_id: request.product_id,
            size_id: request.size_id,
            start_date: request.start_date,
            end_date: request.end_date,
            price: request.price,
        }
    }
}

impl From<PriceRequest> for UpdateProductPrice {
    fn from(request: PriceRequest) -> Self {
        Self {
            product_id: request.product_id,
            size_id: request.size_id,
            start_date: request.start_date,
            end_date: request.end_date,
            price: request.price,
        }
    }
}
