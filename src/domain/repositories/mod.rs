pub mod customers;
pub mod payment_links;
pub mod posts;
pub mod users;
