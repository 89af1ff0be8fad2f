use chrono::Utc;
use serde::Deserialize;

use crate::domain::entities::users::InsertUserEntity;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserModel {
    pub name: String,
    pub email: String,
}

impl RegisterUserModel {
    pub fn to_entity(&self) -> InsertUserEntity {
        let now = Utc::now();
        InsertUserEntity {
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}
