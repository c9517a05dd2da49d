//! `diva-core` — an energy-gated singing actor and the sequencer that drives
//! it through a setlist.
//!
//! # Architecture
//!
//! ```text
//! Context          ← cancellation token + optional deadline, passed explicitly
//!     │
//!     ▼
//! DigitalDiva      ← energy behind a RwLock; `sing` is gated on energy,
//!     │              then on the context, then dispatches on MikuVersion
//!     ▼
//! Performance      ← futures::Stream<Item = Result<(), PerformError>>
//!                    background task + bounded mpsc channel
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use diva_core::{Context, DigitalDiva, MikuVersion, Synthesizer, VoiceBank};
//! use futures::StreamExt;
//!
//! let miku = Arc::new(DigitalDiva::<String>::new(
//!     "Miku",
//!     VoiceBank::new("Hatsune Miku", MikuVersion::V2Classic),
//! ));
//! let ctx = Context::background().with_timeout(std::time::Duration::from_secs(5));
//!
//! miku.sing(&ctx, "World is Mine").await?;
//!
//! let mut show = miku.perform_async(&ctx, vec!["Melt".into(), "Rolling Girl".into()]);
//! while let Some(outcome) = show.next().await {
//!     if let Err(e) = outcome {
//!         println!("Performance error: {e}");
//!     }
//! }
//! ```

pub mod config;
pub mod console;
pub mod context;
pub mod diva;
pub mod error;
pub mod performance;
pub mod processor;
pub mod types;

pub use config::{ConfigWarning, StageConfig, WarnLevel};
pub use console::Console;
pub use context::Context;
pub use diva::{DigitalDiva, Synthesizer};
pub use error::{DivaError, PerformError, Result};
pub use performance::{Performance, PerformanceReport};
pub use processor::{normalize_title, prepare_setlist, with_logging};
pub use types::{append_name, AppendType, MikuVersion, VoiceBank};
