pub mod customers;
pub mod payment_links;
pub mod posts;
pub mod queued_messages;
pub mod users;
