use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = products_prices)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct ProductPrice {
    pub id: i32,
    pub product_id: i32,
    pub size_id: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub price: BigDecimal,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl ProductPrice {
    /// Whether the price applies on `date`. An open end date never expires.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && self.end_date.is_none_or(|end| date <= end)
    }
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = products_prices)]
pub struct NewProductPrice {
    pub product_id: i32,
    pub size_id: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub price: BigDecimal,
}

#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = products_prices)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProductPrice {
    pub product_id: i32,
    pub size_id: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub price: BigDecimal,
}
