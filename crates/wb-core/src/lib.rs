//! wb-core library.
//!
//! A repository is a root directory holding `boards/` (one plain-text file
//! per board) and `trash/`. Three reserved boards carry derived state: the
//! list index, the shortcut table and the activity log. [`BoardManager`]
//! keeps them consistent with the files on disk.
//!
//! # Conventions
//!
//! - **Errors**: every public operation returns `Result<_, BoardError>`.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod activity;
pub mod config;
pub mod error;
pub mod list_index;
pub mod manager;
pub mod paths;
pub mod session;
pub mod shortcuts;
pub mod special;
pub mod stats;
pub mod store;
pub mod trash;
pub mod vcs;

pub use error::{BoardError, ErrorCode};
pub use manager::{BoardManager, Listing, Logged, View};
pub use special::{ReservedNames, SpecialBoard};
