//! User-facing error messages with suggestions
//!
//! Used by the CLI for mistakes a user can fix: a reference that matches no
//! prompt, a reference that matches several, or a mistyped command.

use colored::*;
use fuzzy_matcher::{skim::SkimMatcherV2, FuzzyMatcher};

use crate::prompt::Prompt;

/// Format a "prompt not found" error, suggesting close titles
pub fn format_prompt_not_found(reference: &str, prompts: &[Prompt]) -> String {
    let mut message = format!("Error: Prompt '{}' not found\n\n", reference)
        .red()
        .to_string();

    let matcher = SkimMatcherV2::default();
    let mut suggestions: Vec<(&Prompt, i64)> = prompts
        .iter()
        .filter_map(|p| matcher.fuzzy_match(&p.title, reference).map(|score| (p, score)))
        .collect();

    suggestions.sort_by(|a, b| b.1.cmp(&a.1));

    if !suggestions.is_empty() {
        message.push_str(&"Did you mean one of these?\n".yellow().to_string());
        for (prompt, _) in suggestions.iter().take(3) {
            message.push_str(&format!("  - {} ({})\n", prompt.title, prompt.id.dimmed()));
        }
        message.push('\n');
    }

    message.push_str(&format!(
        "Try '{}' to see all prompts or '{}' to search.\n",
        "pv ls".cyan(),
        format!("pv ls --search {}", reference).cyan()
    ));

    message
}

/// Format an ambiguous reference error listing the candidates
pub fn format_ambiguous_reference(reference: &str, candidates: &[&Prompt]) -> String {
    let mut message = format!("Error: '{}' matches more than one prompt\n\n", reference)
        .red()
        .to_string();

    for prompt in candidates {
        message.push_str(&format!("  {:<36} {}\n", prompt.title.bold(), prompt.id.dimmed()));
    }

    message.push_str(&format!(
        "\nUse the id to pick one, e.g. '{}'\n",
        format!("pv show {}", candidates.first().map_or("<id>", |p| p.id.as_str())).cyan()
    ));

    message
}

/// Format a command typo error with suggestions
pub fn format_command_typo(command: &str, available_commands: &[&str]) -> String {
    let mut message = format!("Error: Unknown command '{}'\n\n", command)
        .red()
        .to_string();

    if command == "pv" {
        message.push_str(&format!(
            "{}\n\n",
            "Did you type 'pv pv' instead of just 'pv'? Try removing the extra 'pv'.".yellow()
        ));
    } else {
        let matcher = SkimMatcherV2::default();
        let mut suggestions: Vec<(&str, i64)> = available_commands
            .iter()
            .filter_map(|&cmd| matcher.fuzzy_match(cmd, command).map(|score| (cmd, score)))
            .collect();

        suggestions.sort_by(|a, b| b.1.cmp(&a.1));

        if !suggestions.is_empty() && suggestions[0].1 > 50 {
            message.push_str(
                &format!("Did you mean '{}'?\n\n", suggestions[0].0)
                    .yellow()
                    .to_string(),
            );
        }
    }

    message.push_str("Available commands:\n");
    for cmd in available_commands {
        message.push_str(&format!("  {}\n", cmd));
    }

    message.push_str(&format!("\nRun '{}' for more information\n", "pv --help".cyan()));

    message
}
