pub mod advice;
pub mod budget;
pub mod check_in;
pub mod debt;
pub mod goal;
pub mod profile;
