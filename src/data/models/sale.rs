use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = sales)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Sale {
    pub id: i32,
    pub customer_id: i32,
    pub status: String,
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub total: BigDecimal,
    pub coupon_id: Option<i32>,
    pub payment_method: String,
    pub date: NaiveDate,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = sales)]
pub struct NewSale {
    pub customer_id: i32,
    pub status: String,
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub total: BigDecimal,
    pub coupon_id: Option<i32>,
    pub payment_method: String,
    pub date: NaiveDate,
}

#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = sales)]
pub struct UpdateSale {
    pub status: String,
    pub payment_method: String,
}

#[derive(Queryable, Selectable, Insertable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = sale_items)]
#[diesel(belongs_to(Sale, foreign_key = sale_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct SaleItem {
    pub sale_id: i32,
    pub product_id: i32,
    pub size_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

/// A priced line of a sale that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleLine {
    pub product_id: i32,
    pub size_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl SaleLine {
    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }

    pub fn into_item(self, sale_id: i32) -> SaleItem {
        SaleItem {
            sale_id,
            product_id: self.product_id,
            size_id: self.size_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

/// Sale workflow statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Pending,
    Paid,
    Delivered,
    Canceled,
}

impl SaleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Pending => "pending",
            SaleStatus::Paid => "paid",
            SaleStatus::Delivered => "delivered",
            SaleStatus::Canceled => "canceled",
        }
    }

    /// Staying in the same status is always allowed; `Canceled` is terminal.
    pub fn can_transition_to(&self, next: SaleStatus) -> bool {
        use SaleStatus::*;

        matches!(
            (self, next),
            (Pending, Pending | Paid | Canceled)
                | (Paid, Paid | Delivered | Canceled)
                | (Delivered, Delivered | Canceled)
                | (Canceled, Canceled)
        )
    }
}

impl FromStr for SaleStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(SaleStatus::Pending),
            "paid" => Ok(SaleStatus::Paid),
            "delivered" => Ok(SaleStatus::Delivered),
            "canceled" => Ok(SaleStatus::Canceled),
            _ => Err(()),
        }
    }
}
