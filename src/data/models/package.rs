use crate::data::models::schema::*;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = packages)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Package {
    pub id: i32,
    pub description: String,
    pub active: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = packages)]
pub struct NewPackage {
    pub description: String,
    pub active: bool,
}

#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = packages)]
pub struct UpdatePackage {
    pub description: String,
    pub active: bool,
}
