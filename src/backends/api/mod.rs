pub mod client;
pub mod errors;

pub use client::{HttpVideoApi, LoginResponse};
pub use errors::ApiError;
