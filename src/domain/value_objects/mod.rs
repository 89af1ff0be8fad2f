pub mod customers;
pub mod enums;
pub mod payment_events;
pub mod payment_links;
pub mod posts;
pub mod users;
