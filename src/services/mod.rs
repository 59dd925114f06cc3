pub mod clients;
pub mod errors;
pub mod products;
pub mod sales;

pub use errors::{ServiceError, ServiceResult};
