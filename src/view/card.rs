use crate::prompt::Prompt;

pub const EMPTY_GRID_MESSAGE: &str = "No prompts found matching your criteria.";

/// First `limit` characters of `content`, with `...` appended when cut
pub fn preview(content: &str, limit: usize) -> String {
    let mut chars = content.char_indices();
    match chars.nth(limit) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

/// Summary of one prompt as shown in the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub description: String,
    pub preview: String,
    pub tags: Vec<String>,
    pub favorite: bool,
}

impl Card {
    pub fn from_prompt(prompt: &Prompt, preview_chars: usize) -> Self {
        Self {
            id: prompt.id.clone(),
            title: prompt.title.clone(),
            description: prompt.summary(),
            preview: preview(&prompt.content, preview_chars),
            tags: prompt.tags.clone(),
            favorite: prompt.favorite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grid {
    Cards(Vec<Card>),
    Empty { message: &'static str },
}

impl Grid {
    /// One card per visible prompt, in pipeline order
    pub fn build(visible: &[&Prompt], preview_chars: usize) -> Self {
        if visible.is_empty() {
            return Grid::Empty {
                message: EMPTY_GRID_MESSAGE,
            };
        }

        Grid::Cards(
            visible
                .iter()
                .map(|p| Card::from_prompt(p, preview_chars))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            Grid::Cards(cards) => cards.len(),
            Grid::Empty { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
