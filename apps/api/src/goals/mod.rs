//! Savings goals. `status` is derived from the amounts on every write.

pub mod handlers;
pub mod store;
