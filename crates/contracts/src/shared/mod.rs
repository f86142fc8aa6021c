pub mod api_error;
pub mod business_info;
pub mod query;
