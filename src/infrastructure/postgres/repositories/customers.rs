use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::{delete, insert_into};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::customers::{CustomerEntity, CustomerWithUserEntity};
use crate::domain::error::AppError;
use crate::domain::repositories::customers::CustomerRepository;
use crate::domain::value_objects::customers::InsertCustomerModel;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{customers, users},
};

pub struct CustomerPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CustomerPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

type CustomerWithUserRow = (
    Uuid,
    String,
    Option<String>,
    Uuid,
    String,
    String,
    DateTime<Utc>,
    DateTime<Utc>,
);

#[async_trait]
impl CustomerRepository for CustomerPostgres {
    async fn create(
        &self,
        insert_customer_model: InsertCustomerModel,
    ) -> Result<CustomerEntity, AppError> {
        let mut conn = self
            .db_pool
            .get()
            .map_err(|err| AppError::storage("create", err))?;

        let customer = insert_into(customers::table)
            .values(&insert_customer_model.to_entity())
            .returning(CustomerEntity::as_select())
            .get_result::<CustomerEntity>(&mut conn)
            .map_err(|err| AppError::storage("create", err))?;

        Ok(customer)
    }

    async fn find_by_id(&self, id: String) -> Result<Option<CustomerWithUserEntity>, AppError> {
        let mut conn = self
            .db_pool
            .get()
            .map_err(|err| AppError::storage("find_by_id", err))?;

        let mut query = customers::table
            .inner_join(users::table)
            .select((
                customers::id,
                customers::email,
                customers::description,
                customers::user_id,
                customers::stripe_customer_id,
                users::name,
                customers::created_at,
                customers::updated_at,
            ))
            .into_boxed();

        // The key is either the remote provider id or the owning user's id.
        query = match Uuid::parse_str(&id) {
            Ok(user_id) => query.filter(
                customers::stripe_customer_id
                    .eq(id.clone())
                    .or(customers::user_id.eq(user_id)),
            ),
            Err(_) => query.filter(customers::stripe_customer_id.eq(id.clone())),
        };

        let row = query
            .first::<CustomerWithUserRow>(&mut conn)
            .optional()
            .map_err(|err| AppError::storage("find_by_id", err))?;

        Ok(row.map(
            |(id, email, description, user_id, stripe_customer_id, user_name, created_at, updated_at)| {
                CustomerWithUserEntity {
                    id,
                    email,
                    description,
                    user_id,
                    stripe_customer_id,
                    user_name,
                    created_at,
                    updated_at,
                }
            },
        ))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut conn = self
            .db_pool
            .get()
            .map_err(|err| AppError::storage("delete", err))?;

        delete(customers::table.find(id))
            .execute(&mut conn)
            .map_err(|err| AppError::storage("delete", err))?;

        Ok(())
    }
}
