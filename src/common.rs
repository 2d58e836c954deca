pub mod business_day;
pub mod error;
