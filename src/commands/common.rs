use colored::*;
use promptvault::{error_help, MatchResult, Notice, NoticeLevel, VaultController};

/// Resolve a user reference to a prompt id, exiting with status 1 when it
/// matches nothing or more than one prompt
pub fn resolve_reference(controller: &VaultController, reference: &str) -> String {
    let prompts = controller.library().prompts();
    match promptvault::matching::resolve(prompts, reference) {
        MatchResult::Exact(prompt) => prompt.id.clone(),
        MatchResult::Multiple(candidates) => {
            eprint!(
                "{}",
                error_help::format_ambiguous_reference(reference, &candidates)
            );
            std::process::exit(1);
        }
        MatchResult::None => {
            eprint!("{}", error_help::format_prompt_not_found(reference, prompts));
            std::process::exit(1);
        }
    }
}

/// Print a notice: errors to stderr, everything else to stdout
pub fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => println!("{} {}", "✓".green(), notice.message),
        NoticeLevel::Info => println!("{}", notice.message),
        NoticeLevel::Error => eprintln!("{}: {}", "Error".red(), notice.message),
    }
}
