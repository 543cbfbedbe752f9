pub mod app;

use anyhow::Result;
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::config::Config;

pub struct AppPlatform;

impl AppPlatform {
    pub fn run_terminal(runtime: Arc<Runtime>, config: &Config) -> Result<()> {
        let app = app::TubedeckApp::new(runtime, config)?;
        app.run()
    }
}
