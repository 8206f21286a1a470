use crate::api::controllers::dto::validation::positive_decimal;
use crate::data::models::size::{NewSize, Size, UpdateSize};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct SizeRequest {
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    /// Liters
    #[validate(custom(function = "positive_decimal"))]
    pub capacity: BigDecimal,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SizeDTO {
    pub id: i32,
    pub description: String,
    pub capacity: BigDecimal,
}

impl From<Size> for SizeDTO {
    fn from(size: Size) -> Self {
        Self {
            id: size.id,
            description: size.description,
            capacity: size.capacity,
        }
    }
}

impl From<SizeRequest> for NewSize {
    fn from(request: SizeRequest) -> Self {
        Self {
            description: request.description,
            capacity: request.capacity,
        }
    }
}

impl From<SizeRequest> for UpdateSize {
    fn from(request: SizeRequest) -> Self {
        Self {
            description: request.description,
            capacity: request.capacity,
        }
    }
}
