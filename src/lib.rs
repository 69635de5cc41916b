//! PromptVault - a personal library of reusable AI prompts
//!
//! PromptVault keeps prompts (a title, tags and the text itself) in a single
//! JSON slot on disk, and lets you browse, filter, favorite and copy them from
//! a terminal UI or the `pv` command line.
//!
//! # Quick Start
//!
//! ```no_run
//! use promptvault::{PromptLibrary, Storage, VaultConfig, VaultController};
//!
//! let storage = Storage::new()?;
//! storage.init()?;
//! let config = VaultConfig::load(&storage.config_path())?;
//!
//! let library = PromptLibrary::load(storage.with_slot(config.storage.slot.clone()));
//! let mut controller = VaultController::new(library, config.display);
//! controller.submit_search("python");
//! for prompt in controller.visible() {
//!     println!("{}", prompt.title);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`storage`]: the JSON slot on disk
//! - [`library`]: the record list with write-through persistence and seeding
//! - [`query`]: tag, view and search filters plus sorting
//! - [`view`]: cards, the empty placeholder and the detail overlay
//! - [`controller`]: user actions, notices and confirmation
//! - [`tui`]: terminal user interface (feature-gated)

pub mod clipboard;
pub mod config;
pub mod controller;
pub mod error_help;
pub mod form;
pub mod library;
pub mod logging;
pub mod matching;
pub mod prompt;
pub mod query;
pub mod seed;
pub mod storage;
pub mod view;

#[cfg(feature = "tui")]
pub mod tui;

pub use clipboard::{Clipboard, ClipboardSink};
pub use config::VaultConfig;
pub use controller::{Confirm, Notice, NoticeLevel, VaultController};
pub use form::{FormError, PromptForm};
pub use library::{parse_tags, PromptLibrary};
pub use logging::{init_logging, log_store_operation, LogConfig};
pub use matching::{MatchResult, Matcher};
pub use prompt::Prompt;
pub use query::{Selection, SortKey, ViewTab};
pub use storage::{SlotError, Storage};
