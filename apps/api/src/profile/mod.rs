//! Financial profile: one row per user holding income, expenses, savings,
//! outstanding debt and credit score.

pub mod handlers;
pub mod store;
