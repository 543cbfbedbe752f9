pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod core;
pub mod models;
pub mod platforms;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;
