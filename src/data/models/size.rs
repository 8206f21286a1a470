use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = sizes)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Size {
    pub id: i32,
    pub description: String,
    /// Capacity in litres.
    pub capacity: BigDecimal,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = sizes)]
pub struct NewSize {
    pub description: String,
    pub capacity: BigDecimal,
}

#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = sizes)]
pub struct UpdateSize {
    pub description: String,
    pub capacity: BigDecimal,
}
