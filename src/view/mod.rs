//! Pure projections from prompt records to what the surfaces draw
//!
//! Nothing here touches the terminal. The TUI and the CLI both render these
//! values, so the wording of labels and placeholders lives in one place.

mod card;
mod detail;

pub use card::{preview, Card, Grid, EMPTY_GRID_MESSAGE};
pub use detail::{format_date, DetailOverlay, DetailView};
