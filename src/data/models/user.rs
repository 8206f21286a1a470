use crate::data::models::schema::*;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub kind: String,
    pub document: Option<String>,
    pub state_registration: Option<String>,
    pub administrator: bool,
    pub guest: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub kind: String,
    pub document: Option<String>,
    pub state_registration: Option<String>,
    pub administrator: bool,
    pub guest: bool,
}

/// Full replace of the editable columns. The password hash is changed
/// separately so that omitting it keeps the stored one.
#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateUser {
    pub name: String,
    pub email: String,
    pub kind: String,
    pub document: Option<String>,
    pub state_registration: Option<String>,
    pub administrator: bool,
    pub guest: bool,
}

#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = users)]
pub struct UpdateProfile {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserKind {
    Individual,
    Company,
}

impl UserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserKind::Individual => "individual",
            UserKind::Company => "company",
        }
    }
}

impl FromStr for UserKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "individual" => Ok(UserKind::Individual),
            "company" => Ok(UserKind::Company),
            _ => Err(()),
        }
    }
}
