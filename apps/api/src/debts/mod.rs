//! Debts and recurring subscriptions, with their monthly cost and due-date tracking.

pub mod handlers;
pub mod store;
