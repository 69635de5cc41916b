// Core prompt management commands: ls, show, new, edit, delete, fav, copy, tags

use anyhow::{bail, Context, Result};
use colored::*;
use is_terminal::IsTerminal;
use promptvault::clipboard::write_to_stdout;
use promptvault::query::{SortKey, ViewTab, ALL_TAGS};
use promptvault::view::{Card, DetailView, Grid};
use promptvault::{Clipboard, PromptForm, VaultController};
use std::io::{self, Read, Write};
use std::time::Instant;

use super::common::{print_notice, resolve_reference};

fn print_card(card: &Card) {
    let star = if card.favorite { "★".yellow() } else { " ".normal() };
    println!("{} {}  {}", star, card.title.bold(), card.id.dimmed());
    println!("  {}", card.description);
    for line in card.preview.lines() {
        println!("  {}", line.dimmed());
    }
    if !card.tags.is_empty() {
        let chips: Vec<String> = card.tags.iter().map(|t| format!("#{}", t)).collect();
        println!("  {}", chips.join(" ").cyan());
    }
    println!();
}

fn print_detail(detail: &DetailView) {
    println!("{}", detail.title.bold());
    if !detail.tags.is_empty() {
        let chips: Vec<String> = detail.tags.iter().map(|t| format!("#{}", t)).collect();
        println!("{}", chips.join(" ").cyan());
    }
    println!(
        "{}",
        format!("{}  ·  {}  ·  {}", detail.added, detail.modified, detail.used).dimmed()
    );
    println!("{}", detail.favorite_label.yellow());
    println!("\n{}\n", detail.description.italic());
    println!("{}", detail.content);
}

pub fn handle_ls(
    controller: &mut VaultController,
    tag: Option<&str>,
    favorites: bool,
    sort: SortKey,
    search: Option<&str>,
    start: Instant,
) -> Result<()> {
    controller.set_tag(tag.unwrap_or(ALL_TAGS));
    controller.set_view(if favorites {
        ViewTab::Favorites
    } else {
        ViewTab::AllPrompts
    });
    controller.set_sort(sort);
    controller.submit_search(search.unwrap_or(""));

    // Piped output is one `id<TAB>title` line per prompt
    if !io::stdout().is_terminal() {
        let mut stdout = io::stdout();
        for prompt in controller.visible() {
            writeln!(stdout, "{}\t{}", prompt.id, prompt.title)?;
        }
        return Ok(());
    }

    let grid = controller.grid();
    println!(
        "📋 {} {} ({}ms)\n",
        controller.selection().view.label().green(),
        format!("[{} · {}]", controller.selection().tag, sort).dimmed(),
        start.elapsed().as_millis()
    );

    match grid {
        Grid::Empty { message } => println!("  {}", message),
        Grid::Cards(cards) => {
            for card in &cards {
                print_card(card);
            }
        }
    }

    Ok(())
}

pub fn handle_show(controller: &mut VaultController, reference: &str) -> Result<()> {
    let id = resolve_reference(controller, reference);
    controller.open(&id);
    let detail = controller
        .detail()
        .with_context(|| format!("Prompt '{}' disappeared", id))?;

    if io::stdout().is_terminal() {
        print_detail(&detail);
    } else {
        write_to_stdout(&detail.content)?;
    }

    Ok(())
}

fn read_stdin_content() -> Result<Option<String>> {
    if io::stdin().is_terminal() {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read prompt content from stdin")?;
    Ok(Some(buffer.trim_end().to_string()))
}

pub fn handle_new(
    controller: &mut VaultController,
    title: &str,
    tags: &str,
    content: Option<&str>,
    start: Instant,
) -> Result<()> {
    let content = match content {
        Some(text) => text.to_string(),
        None => read_stdin_content()?.unwrap_or_default(),
    };

    let form = PromptForm::new(title, tags, content);
    let (id, notice) = controller.create(&form)?;
    print_notice(&notice);
    println!(
        "  {} ({}ms)",
        id.dimmed(),
        start.elapsed().as_millis()
    );

    Ok(())
}

pub fn handle_edit(
    controller: &mut VaultController,
    reference: &str,
    title: Option<&str>,
    tags: Option<&str>,
    content: Option<&str>,
) -> Result<()> {
    if title.is_none() && tags.is_none() && content.is_none() {
        bail!("Nothing to change: pass --title, --tags or --content");
    }

    let id = resolve_reference(controller, reference);
    let Some(prompt) = controller.library().get(&id) else {
        bail!("Prompt '{}' disappeared", id);
    };

    let mut form = PromptForm::from_prompt(prompt);
    if let Some(title) = title {
        form.title = title.to_string();
    }
    if let Some(tags) = tags {
        form.tags = tags.to_string();
    }
    if let Some(content) = content {
        form.content = content.to_string();
    }

    if let Some(notice) = controller.edit(&id, &form)? {
        print_notice(&notice);
    }

    Ok(())
}

fn ask_on_stdin(question: &str) -> bool {
    print!("{} [y/N] ", question.red());
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    input.trim().eq_ignore_ascii_case("y")
}

pub fn handle_delete(controller: &mut VaultController, reference: &str, yes: bool) -> Result<()> {
    let id = resolve_reference(controller, reference);

    if !yes {
        if let Some(prompt) = controller.library().get(&id) {
            println!("\n{}", "About to delete:".yellow().bold());
            println!("  {} - {}", prompt.title.bold(), prompt.summary());
            let preview = prompt.content.lines().take(3).collect::<Vec<_>>().join("\n  ");
            if !preview.trim().is_empty() {
                println!("  {}", preview.dimmed());
                if prompt.content.lines().count() > 3 {
                    println!("  {}", "...".dimmed());
                }
            }
            println!();
        }
    }

    let result = if yes {
        controller.delete(&id, &mut |_: &str| true)?
    } else {
        controller.delete(&id, &mut ask_on_stdin)?
    };

    match result {
        Some(notice) => print_notice(&notice),
        None => println!("Deletion cancelled"),
    }

    Ok(())
}

pub fn handle_fav(controller: &mut VaultController, reference: &str) -> Result<()> {
    let id = resolve_reference(controller, reference);
    if let Some(notice) = controller.toggle_favorite(&id)? {
        print_notice(&notice);
    }
    Ok(())
}

/// Copy to the clipboard on a terminal, otherwise pipe the content out
pub fn handle_copy(controller: &mut VaultController, reference: &str) -> Result<()> {
    let id = resolve_reference(controller, reference);

    if !io::stdout().is_terminal() {
        if let Some(prompt) = controller.library().get(&id) {
            write_to_stdout(&prompt.content)?;
        }
        controller.library_mut().record_use(&id)?;
        return Ok(());
    }

    let mut clipboard = Clipboard::new();
    controller.open(&id);
    let notice = controller.copy_open(&mut clipboard)?;
    print_notice(&notice);

    Ok(())
}

pub fn handle_tags(controller: &VaultController) -> Result<()> {
    let library = controller.library();
    let tags = library.tags();

    if tags.is_empty() {
        println!("No tags yet. Add some with: {} --tags \"A, B\"", "pv edit <ref>".bold());
        return Ok(());
    }

    println!("🏷  {}\n", "Tags:".green());
    for tag in tags {
        let count = library.prompts().iter().filter(|p| p.has_tag(tag)).count();
        println!("  {:<24} {}", tag.bold(), count.to_string().dimmed());
    }

    Ok(())
}
