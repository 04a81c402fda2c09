//! Board state synchronizer.
//!
//! Keeps a UI-facing [`BoardSnapshot`] consistent with an opaque rules engine
//! and shares it with every part of the interface through a single
//! [`BoardProvider`].
//!
//! # Example
//!
//! ```no_run
//! use board_sync::{BoardHandle, BoardProvider};
//! use engine::CozyEngine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = BoardProvider::spawn(CozyEngine::new())?;
//!     provider
//!         .scope(async {
//!             let board = BoardHandle::current()?;
//!             board.apply_move("e2".parse()?, "e4".parse()?).await?;
//!             println!("{}", board.snapshot().await?.fen);
//!             Ok::<_, Box<dyn std::error::Error>>(())
//!         })
//!         .await?;
//!     provider.shutdown().await;
//!     Ok(())
//! }
//! ```

mod actor;
pub mod commands;
pub mod events;
pub mod feedback;
pub mod handle;
pub mod provider;
pub mod snapshot;
pub mod synchronizer;

pub use commands::SyncError;
pub use events::BoardEvent;
pub use feedback::{drop_feedback, DropFeedback};
pub use handle::BoardHandle;
pub use provider::{BoardConfig, BoardProvider};
pub use snapshot::BoardSnapshot;
pub use synchronizer::BoardSynchronizer;
