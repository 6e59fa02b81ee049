//! The presentation shell: owns all UI state and drives the search cycle.
//!
//! State lives in [`ShellState`] and only changes through
//! [`ShellState::apply`]; the interactive loop is a single consumer of an
//! event channel, so every mutation happens on its own turn of the loop.

pub mod render;
mod state;

pub use state::{Event, Phase, ShellState, Theme};

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::backend::{Backend, BackendError};
use crate::models::TopicDetails;
use crate::ui::{status_icon, truncate_with_ellipsis, Spinner, Status};
use crate::utils::{normalize_topic, ValidationError};
use owo_colors::OwoColorize;

/// Messages consumed by the interactive loop.
#[derive(Debug)]
enum LoopMsg {
    /// A line typed by the user
    Input(String),
    /// stdin closed
    Eof,
    /// The request issued at `generation` completed
    Done {
        generation: u64,
        result: Result<TopicDetails, BackendError>,
    },
}

/// The presentation shell. Holds the single current [`ShellState`] and the
/// backend used for searches.
#[derive(Debug)]
pub struct Shell {
    backend: Arc<dyn Backend>,
    state: ShellState,
}

impl Shell {
    /// Create a shell over the given backend, starting in the idle state.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            state: ShellState::new(),
        }
    }

    /// Create a shell with a chosen initial theme.
    pub fn with_theme(backend: Arc<dyn Backend>, theme: Theme) -> Self {
        let mut shell = Self::new(backend);
        shell.state.theme = theme;
        shell
    }

    /// The current state.
    pub fn state(&self) -> &ShellState {
        &self.state
    }

    fn apply(&mut self, event: Event) {
        self.state = std::mem::take(&mut self.state).apply(event);
    }

    /// Run one full search cycle and return the resulting state.
    ///
    /// The topic is normalized first; an empty or whitespace-only topic is
    /// rejected here and no backend call is made.
    pub async fn run_once(&mut self, raw_topic: &str) -> Result<&ShellState, ValidationError> {
        let topic = normalize_topic(raw_topic)?;

        self.apply(Event::SearchStarted {
            topic: topic.clone(),
        });
        let generation = self.state.generation;

        let event = match self.backend.generate(&topic).await {
            Ok(details) => Event::SearchSucceeded {
                generation,
                details,
            },
            Err(err) => Event::SearchFailed {
                generation,
                message: err.to_string(),
            },
        };
        self.apply(event);

        Ok(&self.state)
    }

    /// Run the interactive loop until the user quits or stdin closes.
    ///
    /// A line of text starts a search; `/theme` toggles dark mode (also
    /// while a search is loading); `/quit` exits. A new search supersedes
    /// any in-flight one: the old call keeps running but its completion
    /// carries a stale generation and is discarded.
    pub async fn run_interactive(&mut self) -> anyhow::Result<()> {
        println!("{}", render::empty_state(self.state.theme));

        let (tx, mut rx) = mpsc::unbounded_channel::<LoopMsg>();

        let input_tx = tx.clone();
        let reader = tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if input_tx.send(LoopMsg::Input(line)).is_err() {
                            break;
                        }
                    }
                    Ok(None) | Err(_) => {
                        let _ = input_tx.send(LoopMsg::Eof);
                        break;
                    }
                }
            }
        });

        let mut spinner: Option<Spinner> = None;

        while let Some(msg) = rx.recv().await {
            match msg {
                LoopMsg::Eof => break,
                LoopMsg::Input(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    match input {
                        "/quit" | "/q" | "/exit" => break,
                        "/theme" | "/t" => {
                            self.apply(Event::ThemeToggled);
                            let label = match self.state.theme {
                                Theme::Dark => "dark",
                                Theme::Light => "light",
                            };
                            let note = format!(
                                "{} Theme switched to {}",
                                status_icon(Status::Info).cyan(),
                                label
                            );
                            // The loading indicator stays untouched by the toggle
                            match &spinner {
                                Some(s) => s.println(&note),
                                None => println!("{}", note),
                            }
                        }
                        topic => match normalize_topic(topic) {
                            Err(err) => {
                                let note = format!(
                                    "{} {}",
                                    status_icon(Status::Info).yellow(),
                                    err
                                );
                                match &spinner {
                                    Some(s) => s.println(&note),
                                    None => println!("{}", note),
                                }
                            }
                            Ok(topic) => {
                                // Supersede any in-flight search
                                if let Some(old) = spinner.take() {
                                    old.finish_and_clear();
                                }
                                self.apply(Event::SearchStarted {
                                    topic: topic.clone(),
                                });
                                let generation = self.state.generation;

                                spinner = Some(Spinner::new(&format!(
                                    "Curating a learning path for \"{}\"...",
                                    truncate_with_ellipsis(&topic, 60)
                                )));

                                let backend = Arc::clone(&self.backend);
                                let done_tx = tx.clone();
                                tokio::spawn(async move {
                                    let result = backend.generate(&topic).await;
                                    let _ = done_tx.send(LoopMsg::Done { generation, result });
                                });
                            }
                        },
                    }
                }
                LoopMsg::Done { generation, result } => {
                    if generation != self.state.generation {
                        tracing::debug!(generation, "discarding stale search completion");
                        continue;
                    }
                    let event = match result {
                        Ok(details) => Event::SearchSucceeded {
                            generation,
                            details,
                        },
                        Err(err) => Event::SearchFailed {
                            generation,
                            message: err.to_string(),
                        },
                    };
                    self.apply(event);

                    if let Some(s) = spinner.take() {
                        s.finish_and_clear();
                    }
                    match &self.state.phase {
                        Phase::Ready(details) => {
                            println!("{}", render::details_pretty(details, self.state.theme));
                        }
                        Phase::Failed(message) => {
                            println!("{}", render::error_panel(message, self.state.theme));
                        }
                        Phase::Idle | Phase::Loading { .. } => {}
                    }
                }
            }
        }

        reader.abort();
        Ok(())
    }
}
