use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = coupons)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Coupon {
    pub id: i32,
    pub name: String,
    pub kind: String,
    pub value: BigDecimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub use_limit: Option<i32>,
    pub uses: i32,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl Coupon {
    /// A coupon applies inside its validity window while it still has uses left.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        let in_window = self.start_date <= date && self.end_date.is_none_or(|end| date <= end);
        let has_uses = self.use_limit.is_none_or(|limit| self.uses < limit);

        in_window && has_uses
    }

    /// Discount granted over `eligible`, never more than `eligible` itself.
    pub fn discount_for(&self, eligible: &BigDecimal) -> BigDecimal {
        let discount = match self.kind.parse::<CouponKind>() {
            Ok(CouponKind::Percentage) => (eligible * &self.value / BigDecimal::from(100)).round(2),
            Ok(CouponKind::Value) => self.value.clone(),
            Err(_) => BigDecimal::from(0),
        };

        discount.min(eligible.clone())
    }
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = coupons)]
pub struct NewCoupon {
    pub name: String,
    pub kind: String,
    pub value: BigDecimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub use_limit: Option<i32>,
}

#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = coupons)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateCoupon {
    pub name: String,
    pub kind: String,
    pub value: BigDecimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub use_limit: Option<i32>,
}

#[derive(Queryable, Selectable, Insertable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = coupon_products)]
#[diesel(belongs_to(Coupon, foreign_key = coupon_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct CouponProduct {
    pub coupon_id: i32,
    pub product_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponKind {
    Value,
    Percentage,
}

impl CouponKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouponKind::Value => "value",
            CouponKind::Percentage => "percentage",
        }
    }
}

impl FromStr for CouponKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "value" => Ok(CouponKind::Value),
            "percentage" => Ok(CouponKind::Percentage),
            _ => Err(()),
        }
    }
}
