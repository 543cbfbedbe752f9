use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::info;

use crate::backends::HttpVideoApi;
use crate::config::Config;
use crate::core::frontend::Frontend;
use crate::platforms::terminal::{TerminalConfirm, TerminalFrontend, stdin_lines};
use crate::state::AppState;

pub struct TubedeckApp {
    runtime: Arc<Runtime>,
    frontend: TerminalFrontend,
}

impl TubedeckApp {
    pub fn new(runtime: Arc<Runtime>, config: &Config) -> Result<Self> {
        let api = HttpVideoApi::new(&config.api.base_url, config.api.request_timeout())
            .with_context(|| format!("Invalid API base URL '{}'", config.api.base_url))?;
        info!("Using video API at {}", api.base_url());

        let store = config
            .credentials
            .build_store()
            .context("Failed to set up credential storage")?;

        let input = stdin_lines();
        let confirm = Arc::new(TerminalConfirm::new(input.clone()));
        let state = AppState::new(Arc::new(api), store, confirm);

        Ok(Self {
            runtime,
            frontend: TerminalFrontend::new(state, input),
        })
    }

    pub fn run(self) -> Result<()> {
        self.frontend.run(self.runtime)
    }
}
