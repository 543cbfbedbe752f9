pub mod frontend;
pub mod projection;
pub mod viewmodels;

pub use frontend::Frontend;
