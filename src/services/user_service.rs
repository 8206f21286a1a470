use crate::api::controllers::dto::user_dto::{
    CreateUserRequest, ProfileRequest, UpdateUserRequest, UserDTO,
};
use crate::data::database::Database;
use crate::data::models::user::{NewUser, UpdateProfile, UpdateUser, User};
use crate::data::repos::implementors::user_repo::UserRepo;
use crate::data::repos::traits::repository::Repository;
use crate::security::password::{hash_password, verify_password};
use crate::services::errors::ServiceError;

pub struct UserService {
    repo: UserRepo,
}

impl UserService {
    pub fn new(db: Database) -> Self {
        UserService {
            repo: UserRepo::new(db),
        }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<UserDTO, ServiceError> {
        if self.repo.get_by_email(&request.email).await?.is_some() {
            return Err(ServiceError::UserAlreadyExists);
        }

        let password_hash = hash_password(&request.password).await?;
        let new_user = NewUser {
            name: request.name,
            email: request.email,
            password_hash,
            kind: request.kind.as_str().to_string(),
            document: request.document,
            state_registration: request.state_registration,
            administrator: request.administrator,
            guest: request.guest,
        };

        let user = self.repo.add(new_user).await.map_err(duplicate_email)?;
        tracing::info!("User {} created", user.id);

        Ok(UserDTO::from(user))
    }

    pub async fn update_user(
        &self,
        user_id: i32,
        request: UpdateUserRequest,
    ) -> Result<UserDTO, ServiceError> {
        self.ensure_email_free(&request.email, user_id).await?;

        let new_hash = match &request.password {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        self.repo
            .update(user_id, (UpdateUser::from(&request), new_hash))
            .await
            .map_err(duplicate_email)?
            .map(UserDTO::from)
            .ok_or(ServiceError::NotFound("User"))
    }

    /// Checks credentials for a new session.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, ServiceError> {
        let user = self
            .repo
            .get_by_email(email)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        if !verify_password(password, &user.password_hash).await? {
            tracing::warn!("Failed sign-in for user {}", user.id);
            return Err(ServiceError::PasswordMismatch);
        }

        Ok(user)
    }

    pub async fn get_profile(&self, user_id: i32) -> Result<UserDTO, ServiceError> {
        self.repo
            .get_by_id(user_id)
            .await?
            .map(UserDTO::from)
            .ok_or(ServiceError::NotFound("User"))
    }

    pub async fn update_profile(
        &self,
        user_id: i32,
        request: ProfileRequest,
    ) -> Result<UserDTO, ServiceError> {
        let user = self
            .repo
            .get_by_id(user_id)
            .await?
            .ok_or(ServiceError::NotFound("User"))?;

        if request.email != user.email {
            self.ensure_email_free(&request.email, user_id).await?;
        }

        let new_hash = match (&request.old_password, &request.password) {
            (Some(old_password), Some(password)) => {
                if !verify_password(old_password, &user.password_hash).await? {
                    return Err(ServiceError::PasswordMismatch);
                }
                Some(hash_password(password).await?)
            }
            _ => None,
        };

        self.repo
            .update_profile(user_id, UpdateProfile::from(&request), new_hash)
            .await
            .map_err(duplicate_email)?
            .map(UserDTO::from)
            .ok_or(ServiceError::NotFound("User"))
    }

    async fn ensure_email_free(&self, email: &str, owner_id: i32) -> Result<(), ServiceError> {
        match self.repo.get_by_email(email).await? {
            Some(other) if other.id != owner_id => Err(ServiceError::UserAlreadyExists),
            _ => Ok(()),
        }
    }
}

/// The only unique column on users is the email.
fn duplicate_email(error: diesel::result::Error) -> ServiceError {
    match ServiceError::from(error) {
        ServiceError::Duplicate => ServiceError::UserAlreadyExists,
        other => other,
    }
}
