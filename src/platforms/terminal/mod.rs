pub mod commands;
pub mod prompt;
pub mod render;

use anyhow::Result;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::core::frontend::Frontend;
use crate::core::viewmodels::LoginOutcome;
use crate::models::{DisplayMode, Video};
use crate::state::AppState;
use commands::{Command, Target};
use prompt::SharedInput;

pub use prompt::{TerminalConfirm, stdin_lines};

/// Line-oriented frontend: one command per line, screen redrawn after each.
pub struct TerminalFrontend {
    state: AppState,
    input: SharedInput,
}

impl TerminalFrontend {
    pub fn new(state: AppState, input: SharedInput) -> Self {
        Self { state, input }
    }

    async fn event_loop(&self) -> Result<()> {
        self.state.initialize().await;
        println!("{}", render::HELP);

        loop {
            self.draw();
            let Some(line) = prompt::read_line(&self.input, "> ").await? else {
                break;
            };
            match commands::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command).await,
                Err(e) => println!("{e}"),
            }
        }

        info!("Terminal session ended");
        Ok(())
    }

    fn draw(&self) {
        if let Some(line) = render::status_line(&self.state.status()) {
            println!("{line}");
        }

        if !self.state.is_authenticated() {
            println!("{}", render::anonymous());
            return;
        }

        match (self.state.display_mode(), self.state.now_playing()) {
            (DisplayMode::Player, Some(now_playing)) => print!("{}", render::player(&now_playing)),
            _ => print!(
                "{}",
                render::dashboard(
                    &self.state.dashboard(),
                    self.state.videos().len(),
                    &self.state.view_state(),
                    &self.state.form(),
                )
            ),
        }
    }

    async fn execute(&self, command: Command) {
        debug!("Executing {:?}", command);
        match command {
            Command::Login { email, password } => {
                if self.state.login(&email, &password).await == LoginOutcome::Authenticated {
                    println!("Logged in as {email}");
                }
            }
            Command::Register {
                name,
                email,
                password,
            } => {
                self.state.register(&name, &email, &password).await;
            }
            Command::Logout => self.state.logout(),
            Command::Whoami => match self.state.profile().await {
                Some(profile) => println!("{} <{}>", profile.name, profile.email),
                None => println!("Not logged in"),
            },
            Command::Refresh => {
                self.state.refresh().await;
            }
            Command::Search(text) => self.state.set_search_text(text),
            Command::Sort => self.state.toggle_sort_order(),
            Command::Title(text) => self.state.update_form(|form| form.title = text),
            Command::Description(text) => self.state.update_form(|form| form.description = text),
            Command::Source(text) => self.state.update_form(|form| form.source_id = text),
            Command::Add => {
                self.state.submit_form().await;
            }
            Command::Delete(target) => match self.resolve(&target) {
                Some(video) => {
                    self.state.delete_video(&video.id).await;
                }
                None => println!("No such video"),
            },
            Command::Play(target) => match self.resolve(&target) {
                Some(video) => self.state.select(video),
                None => println!("No such video"),
            },
            Command::Back => self.state.deselect(),
            Command::Help => println!("{}", render::HELP),
            Command::Quit | Command::Empty => {}
        }
    }

    fn resolve(&self, target: &Target) -> Option<Video> {
        match target {
            Target::Row(row) => self.state.dashboard().into_iter().nth(row - 1),
            Target::Id(id) => self.state.videos().into_iter().find(|video| &video.id == id),
        }
    }
}

impl Frontend for TerminalFrontend {
    fn run(&self, runtime: Arc<Runtime>) -> Result<()> {
        runtime.block_on(self.event_loop())
    }
}
