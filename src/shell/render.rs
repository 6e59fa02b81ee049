//! Rendering for the four shell views.
//!
//! Each function maps state to a string; the shell decides which one to
//! print based on the current [`Phase`](crate::shell::Phase). Every match
//! on [`Difficulty`] and [`ResourceType`] here is exhaustive, so a new
//! variant shows up as a compile error at the display sites.

use comfy_table::{presets, Attribute, Cell, Table};
use owo_colors::OwoColorize;

use crate::models::{Difficulty, ResourceType, TopicDetails};
use crate::shell::Theme;
use crate::ui::{difficulty_icon, resource_icon, status_icon, terminal_width, Status};

fn heading(text: &str, theme: Theme) -> String {
    match theme {
        Theme::Dark => text.bright_cyan().bold().to_string(),
        Theme::Light => text.blue().bold().to_string(),
    }
}

fn accent(text: &str, theme: Theme) -> String {
    match theme {
        Theme::Dark => text.bright_yellow().to_string(),
        Theme::Light => text.yellow().to_string(),
    }
}

fn muted(text: &str, theme: Theme) -> String {
    match theme {
        Theme::Dark => text.bright_black().to_string(),
        Theme::Light => text.dimmed().to_string(),
    }
}

fn difficulty_badge(difficulty: Difficulty, theme: Theme) -> String {
    let label = format!("{} {}", difficulty_icon(difficulty), difficulty.label());
    let colored = match difficulty {
        Difficulty::Beginner => label.green().to_string(),
        Difficulty::Intermediate => label.yellow().to_string(),
        Difficulty::Advanced => label.red().to_string(),
        Difficulty::Expert => label.magenta().to_string(),
    };
    match theme {
        Theme::Dark => colored.bold().to_string(),
        Theme::Light => colored,
    }
}

fn kind_label(kind: ResourceType) -> String {
    format!("{} {}", resource_icon(kind), kind.label())
}

/// The prompt shown before any search has run.
pub fn empty_state(theme: Theme) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&heading("Unlock Your Learning Potential", theme));
    out.push('\n');
    out.push_str(
        "Enter any topic to generate a curated, step-by-step learning path.\n\
         From programming languages to historical events, Learning Nexus is\n\
         your personal guide to knowledge.\n",
    );
    out.push('\n');
    out.push_str(&muted(
        "Type a topic and press Enter. /theme toggles dark mode, /quit exits.",
        theme,
    ));
    out.push('\n');
    out
}

/// The error panel shown when a search fails.
pub fn error_panel(message: &str, theme: Theme) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!(
        "{} {}\n",
        status_icon(Status::Error).red().bold(),
        "An Error Occurred".red().bold()
    ));
    out.push_str(&format!("  {}\n", message));
    out.push_str(&muted("Search again to retry.", theme));
    out.push('\n');
    out
}

/// The overview panel plus the ordered learning path.
pub fn details_pretty(details: &TopicDetails, theme: Theme) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(&format!(
        "{} {}\n",
        heading(&details.topic_name, theme),
        difficulty_badge(details.difficulty, theme)
    ));

    let mut overview = Table::new();
    overview.load_preset(presets::UTF8_FULL);
    overview.set_width(terminal_width().min(100) as u16);
    overview.add_row(vec![
        Cell::new("Summary").add_attribute(Attribute::Bold),
        Cell::new(&details.summary),
    ]);
    overview.add_row(vec![
        Cell::new("Why it matters").add_attribute(Attribute::Bold),
        Cell::new(&details.why_it_matters),
    ]);
    if !details.related_topics.is_empty() {
        overview.add_row(vec![
            Cell::new("Related topics").add_attribute(Attribute::Bold),
            Cell::new(details.related_topics.join(", ")),
        ]);
    }
    out.push_str(&overview.to_string());
    out.push('\n');

    out.push('\n');
    out.push_str(&heading("Your Personalized Learning Path", theme));
    out.push('\n');

    // Wire order is step order; never re-sorted.
    for (index, resource) in details.learning_path.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!(
            " {}. {} {} {}\n",
            index + 1,
            accent(&kind_label(resource.kind), theme),
            resource.title.bold(),
            muted(&format!("— {}", resource.source), theme),
        ));
        if !resource.description.is_empty() {
            out.push_str(&format!("    {}\n", resource.description));
        }
        out.push_str(&format!("    {}\n", muted(&resource.url, theme)));
    }

    out
}

/// Plain-text rendering for non-TTY output.
pub fn details_plain(details: &TopicDetails) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} [{}]\n",
        details.topic_name, details.difficulty
    ));
    out.push_str(&format!("Summary: {}\n", details.summary));
    out.push_str(&format!("Why it matters: {}\n", details.why_it_matters));
    if !details.related_topics.is_empty() {
        out.push_str(&format!(
            "Related: {}\n",
            details.related_topics.join(", ")
        ));
    }
    for (index, resource) in details.learning_path.iter().enumerate() {
        out.push_str(&format!(
            "{}. [{}] {} ({})\n   {}\n",
            index + 1,
            resource.kind,
            resource.title,
            resource.source,
            resource.url
        ));
    }
    out
}
