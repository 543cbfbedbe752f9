pub mod api;
pub mod traits;

pub use api::{ApiError, HttpVideoApi};
pub use traits::VideoBackend;
