//! UI state machine for the search cycle.
//!
//! All mutable UI state lives in one [`ShellState`] value and every change
//! goes through [`ShellState::apply`], a pure function from (state, event)
//! to state. The [`Phase`] enum makes the four views (empty state, loading,
//! result, error) mutually exclusive by construction.

use crate::models::TopicDetails;

/// Process-wide visual preference. Orthogonal to the search cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Where the current search cycle stands. Exactly one view per phase.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// No search yet, or state was reset. Shows the empty-state prompt.
    Idle,
    /// A request is in flight for this topic.
    Loading { topic: String },
    /// The last search succeeded.
    Ready(TopicDetails),
    /// The last search failed with this message.
    Failed(String),
}

/// Events that drive the state machine.
#[derive(Debug, Clone)]
pub enum Event {
    /// A user-initiated search with an already-normalized topic
    SearchStarted { topic: String },
    /// The request issued at `generation` resolved with a plan
    SearchSucceeded {
        generation: u64,
        details: TopicDetails,
    },
    /// The request issued at `generation` failed
    SearchFailed { generation: u64, message: String },
    /// The dark/light toggle was flipped
    ThemeToggled,
}

/// The complete UI state.
///
/// `generation` counts searches; completion events carry the generation of
/// the search that produced them, and stale completions are discarded so an
/// old in-flight response can never overwrite a newer search's state.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellState {
    pub phase: Phase,
    pub theme: Theme,
    pub generation: u64,
}

impl ShellState {
    /// Initial state: idle, dark theme, generation zero.
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            theme: Theme::Dark,
            generation: 0,
        }
    }

    /// Apply one event, producing the next state.
    ///
    /// Starting a search clears any previous result and error before the
    /// request is issued; completions only land if their generation is
    /// still current.
    #[must_use]
    pub fn apply(mut self, event: Event) -> Self {
        match event {
            Event::SearchStarted { topic } => {
                self.generation += 1;
                self.phase = Phase::Loading { topic };
            }
            Event::SearchSucceeded {
                generation,
                details,
            } => {
                if generation == self.generation && matches!(self.phase, Phase::Loading { .. }) {
                    self.phase = Phase::Ready(details);
                }
            }
            Event::SearchFailed {
                generation,
                message,
            } => {
                if generation == self.generation && matches!(self.phase, Phase::Loading { .. }) {
                    self.phase = Phase::Failed(message);
                }
            }
            Event::ThemeToggled => {
                self.theme = self.theme.toggled();
            }
        }
        self
    }

    /// Whether a request is currently in flight
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    /// The current result, if any
    pub fn details(&self) -> Option<&TopicDetails> {
        match &self.phase {
            Phase::Ready(details) => Some(details),
            _ => None,
        }
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}
