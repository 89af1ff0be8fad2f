pub mod customers;
pub mod payment_webhook;
pub mod posts;
pub mod users;
