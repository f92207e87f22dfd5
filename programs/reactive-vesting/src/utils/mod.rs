pub mod accounts;
pub mod math;
