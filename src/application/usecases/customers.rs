use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::interfaces::payments::PaymentGateway;
use crate::domain::error::AppError;
use crate::domain::repositories::{customers::CustomerRepository, users::UserRepository};
use crate::domain::value_objects::customers::{
    CreateCustomerDto, CreateCustomerModel, CustomerDetailsDto, InsertCustomerModel,
};

pub struct CreateCustomerUseCase<U, C, G>
where
    U: UserRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
{
    user_repo: Arc<U>,
    customer_repo: Arc<C>,
    payment_gateway: Arc<G>,
}

impl<U, C, G> CreateCustomerUseCase<U, C, G>
where
    U: UserRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
{
    pub fn new(user_repo: Arc<U>, customer_repo: Arc<C>, payment_gateway: Arc<G>) -> Self {
        Self {
            user_repo,
            customer_repo,
            payment_gateway,
        }
    }

    /// Remote customer first, local row second; there is no compensation if
    /// the local write fails after the remote create succeeded.
    pub async fn execute(
        &self,
        create_customer_model: CreateCustomerModel,
    ) -> Result<CreateCustomerDto, AppError> {
        let user = self
            .user_repo
            .find_by_id(create_customer_model.user_id)
            .await?
            .ok_or_else(|| {
                let err = AppError::UserNotFound;
                warn!(
                    user_id = %create_customer_model.user_id,
                    status = err.status_code().as_u16(),
                    "customers: user does not resolve"
                );
                err
            })?;

        let result = async {
            let remote_customer = self
                .payment_gateway
                .create_customer(user.name.clone(), user.email.clone())
                .await?;

            info!(
                user_id = %user.id,
                stripe_customer_id = %remote_customer.id,
                "customers: remote customer created"
            );

            let local_customer = self
                .customer_repo
                .create(InsertCustomerModel {
                    email: user.email.clone(),
                    stripe_customer_id: remote_customer.id.clone(),
                    user_id: user.id,
                    description: create_customer_model.description.clone(),
                })
                .await?;

            Ok::<CreateCustomerDto, AppError>(CreateCustomerDto {
                created_at_stripe: remote_customer.created.to_string(),
                stripe_customer_id: remote_customer.id,
                id: local_customer.id,
                email: local_customer.email,
                name: user.name.clone(),
                created_at: local_customer.created_at,
                updated_at: local_customer.updated_at,
            })
        }
        .await;

        result.map_err(|err| {
            error!(
                user_id = %user.id,
                error = %err,
                "customers: customer provisioning failed"
            );
            AppError::CustomerProvisioning {
                source: Box::new(err),
            }
        })
    }
}

pub struct FindOneCustomerUseCase<C, G>
where
    C: CustomerRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
{
    customer_repo: Arc<C>,
    payment_gateway: Arc<G>,
}

impl<C, G> FindOneCustomerUseCase<C, G>
where
    C: CustomerRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
{
    pub fn new(customer_repo: Arc<C>, payment_gateway: Arc<G>) -> Self {
        Self {
            customer_repo,
            payment_gateway,
        }
    }

    pub async fn execute(&self, id: String) -> Result<CustomerDetailsDto, AppError> {
        let local_customer = self
            .customer_repo
            .find_by_id(id.clone())
            .await?
            .ok_or_else(|| {
                let err = AppError::CustomerNotFound;
                warn!(
                    lookup = %id,
                    status = err.status_code().as_u16(),
                    "customers: customer does not resolve"
                );
                err
            })?;

        let remote_customer = self
            .payment_gateway
            .find_customer_by_email(local_customer.email.clone())
            .await?;

        Ok(CustomerDetailsDto {
            id: local_customer.id,
            email: local_customer.email,
            stripe_customer_id: remote_customer.id,
            created_at: local_customer.created_at,
            updated_at: local_customer.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::interfaces::payments::MockPaymentGateway;
    use crate::domain::entities::customers::{CustomerEntity, CustomerWithUserEntity};
    use crate::domain::entities::users::UserEntity;
    use crate::domain::repositories::customers::MockCustomerRepository;
    use crate::domain::repositories::users::MockUserRepository;
    use crate::infrastructure::payments::stripe_client::StripeCustomer;
    use chrono::Utc;
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn sample_user(id: Uuid) -> UserEntity {
        let now = Utc::now();
        UserEntity {
            id,
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn remote_customer(id: &str, created: i64) -> StripeCustomer {
        StripeCustomer {
            id: id.to_string(),
            created,
            email: Some("john.doe@example.com".to_string()),
            name: Some("John Doe".to_string()),
        }
    }

    #[tokio::test]
    async fn merges_remote_and_local_fields_on_the_happy_path() {
        let user_id = Uuid::new_v4();
        let user = sample_user(user_id);

        let mut user_repo = MockUserRepository::new();
        let lookup_user = user.clone();
        user_repo
            .expect_find_by_id()
            .with(eq(user_id))
            .times(1)
            .returning(move |_| Ok(Some(lookup_user.clone())));

        let mut payment_gateway = MockPaymentGateway::new();
        payment_gateway
            .expect_create_customer()
            .with(eq("John Doe".to_string()), eq("john.doe@example.com".to_string()))
            .times(1)
            .returning(|_, _| Ok(remote_customer("cus_X", 1_700_000_000)));

        let local_id = Uuid::new_v4();
        let now = Utc::now();
        let local_row = CustomerEntity {
            id: local_id,
            email: "john.doe@example.com".to_string(),
            description: Some("vip".to_string()),
            user_id,
            stripe_customer_id: "cus_X".to_string(),
            created_at: now,
            updated_at: now,
        };

        let mut customer_repo = MockCustomerRepository::new();
        let created_row = local_row.clone();
        customer_repo
            .expect_create()
            .with(eq(InsertCustomerModel {
                email: "john.doe@example.com".to_string(),
                stripe_customer_id: "cus_X".to_string(),
                user_id,
                description: Some("vip".to_string()),
            }))
            .times(1)
            .returning(move |_| Ok(created_row.clone()));

        let usecase = CreateCustomerUseCase::new(
            Arc::new(user_repo),
            Arc::new(customer_repo),
            Arc::new(payment_gateway),
        );
        let result = usecase
            .execute(CreateCustomerModel {
                user_id,
                description: Some("vip".to_string()),
            })
            .await
            .expect("customer creation should succeed");

        assert_eq!(
            result,
            CreateCustomerDto {
                created_at_stripe: "1700000000".to_string(),
                stripe_customer_id: "cus_X".to_string(),
                id: local_id,
                email: "john.doe@example.com".to_string(),
                name: "John Doe".to_string(),
                created_at: now,
                updated_at: now,
            }
        );
    }

    #[tokio::test]
    async fn wraps_a_remote_rejection_and_never_writes_locally() {
        let user_id = Uuid::new_v4();
        let user = sample_user(user_id);

        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let mut payment_gateway = MockPaymentGateway::new();
        payment_gateway
            .expect_create_customer()
            .times(1)
            .returning(|_, _| {
                Err(AppError::PaymentProvider {
                    message: "Invalid API Key provided".to_string(),
                })
            });

        // No create expectation on the customer repository.
        let customer_repo = MockCustomerRepository::new();

        let usecase = CreateCustomerUseCase::new(
            Arc::new(user_repo),
            Arc::new(customer_repo),
            Arc::new(payment_gateway),
        );
        let err = usecase
            .execute(CreateCustomerModel {
                user_id,
                description: None,
            })
            .await
            .expect_err("remote rejection must fail the flow");

        assert!(matches!(err, AppError::CustomerProvisioning { .. }));
        assert_eq!(
            err.to_string(),
            "Something went wrong, error: Invalid API Key provided"
        );
        assert_eq!(err.status_code().as_u16(), 400);
    }

    #[tokio::test]
    async fn rejects_an_unknown_user_before_any_remote_call() {
        let user_id = Uuid::new_v4();
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let customer_repo = MockCustomerRepository::new();
        let payment_gateway = MockPaymentGateway::new();

        let usecase = CreateCustomerUseCase::new(
            Arc::new(user_repo),
            Arc::new(customer_repo),
            Arc::new(payment_gateway),
        );
        let err = usecase
            .execute(CreateCustomerModel {
                user_id,
                description: None,
            })
            .await
            .expect_err("missing user must be rejected");

        assert!(matches!(err, AppError::UserNotFound));
        assert_eq!(err.status_code().as_u16(), 400);
    }

    #[tokio::test]
    async fn find_one_merges_the_remote_id_with_local_fields() {
        let customer_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let now = Utc::now();

        let mut customer_repo = MockCustomerRepository::new();
        customer_repo
            .expect_find_by_id()
            .with(eq(user_id.to_string()))
            .times(1)
            .returning(move |_| {
                Ok(Some(CustomerWithUserEntity {
                    id: customer_id,
                    email: "john.doe@example.com".to_string(),
                    description: None,
                    user_id,
                    stripe_customer_id: "cus_X".to_string(),
                    user_name: "John Doe".to_string(),
                    created_at: now,
                    updated_at: now,
                }))
            });

        let mut payment_gateway = MockPaymentGateway::new();
        payment_gateway
            .expect_find_customer_by_email()
            .with(eq("john.doe@example.com".to_string()))
            .times(1)
            .returning(|_| Ok(remote_customer("cus_X", 1_700_000_000)));

        let usecase =
            FindOneCustomerUseCase::new(Arc::new(customer_repo), Arc::new(payment_gateway));
        let result = usecase
            .execute(user_id.to_string())
            .await
            .expect("lookup should succeed");

        assert_eq!(
            result,
            CustomerDetailsDto {
                id: customer_id,
                email: "john.doe@example.com".to_string(),
                stripe_customer_id: "cus_X".to_string(),
                created_at: now,
                updated_at: now,
            }
        );
    }

    #[tokio::test]
    async fn find_one_rejects_a_missing_customer_cleanly() {
        let mut customer_repo = MockCustomerRepository::new();
        customer_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        // No remote lookup expectation.
        let payment_gateway = MockPaymentGateway::new();

        let usecase =
            FindOneCustomerUseCase::new(Arc::new(customer_repo), Arc::new(payment_gateway));
        let err = usecase
            .execute("cus_missing".to_string())
            .await
            .expect_err("missing customer must be rejected");

        assert!(matches!(err, AppError::CustomerNotFound));
        assert_eq!(err.to_string(), "Customer Does not Exists");
        assert_eq!(err.status_code().as_u16(), 409);
    }
}
