use crate::api::controllers::dto::user_dto::UserDTO;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct SessionRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionDTO {
    pub user: UserDTO,
    pub token: String,
}
