use crate::data::models::product::{NewProduct, Product, ProductImage, UpdateProduct};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct ProductRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub active: bool,
    #[serde(default)]
    pub size_ids: Vec<i32>,
}

impl ProductRequest {
    /// Size ids without repeats, in request order.
    pub fn distinct_size_ids(&self) -> Vec<i32> {
        let mut ids = Vec::with_capacity(self.size_ids.len());
        for id in &self.size_ids {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductDTO {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    pub size_ids: Vec<i32>,
}

impl ProductDTO {
    pub fn with_sizes(product: Product, size_ids: Vec<i32>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            active: product.active,
            size_ids,
        }
    }
}

impl From<ProductRequest> for NewProduct {
    fn from(request: ProductRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            active: request.active,
        }
    }
}

impl From<ProductRequest> for UpdateProduct {
    fn from(request: ProductRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            active: request.active,
        }
    }
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct ProductImageRequest {
    #[validate(url, length(max = 255))]
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductImageDTO {
    pub id: i32,
    pub product_id: i32,
    pub url: String,
}

impl From<ProductImage> for ProductImageDTO {
    fn from(image: ProductImage) -> Self {
        Self {
            id: image.id,
            product_id: image.product_id,
            url: image.url,
        }
    }
}
