use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::users::UserEntity;
use crate::domain::error::AppError;
use crate::domain::repositories::users::UserRepository;
use crate::domain::value_objects::users::RegisterUserModel;

pub struct CreateUserUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
}

impl<U> CreateUserUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, register_user_model: RegisterUserModel) -> Result<UserEntity, AppError> {
        let existing = self
            .user_repo
            .find_by_email(register_user_model.email.clone())
            .await?;

        if existing.is_some() {
            let err = AppError::UserAlreadyExists;
            warn!(
                email = %register_user_model.email,
                status = err.status_code().as_u16(),
                "users: email already registered"
            );
            return Err(err);
        }

        let user = self.user_repo.create(register_user_model.to_entity()).await?;
        info!(user_id = %user.id, "users: user registered");

        Ok(user)
    }
}
