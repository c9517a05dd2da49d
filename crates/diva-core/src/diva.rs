use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::console::Console;
use crate::context::Context;
use crate::error::PerformError;
use crate::performance::Performance;
use crate::types::{MikuVersion, VoiceBank, DEFAULT_PACING, LOW_ENERGY_THRESHOLD, MAX_ENERGY};

// ─── Synthesizer ──────────────────────────────────────────────────────────

/// Anything that can be driven through a [`Performance`].
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Sing one song. Must not change the singer's energy.
    async fn sing(&self, ctx: &Context, song: &str) -> Result<(), PerformError>;

    fn version(&self) -> MikuVersion;
}

// ─── DigitalDiva ──────────────────────────────────────────────────────────

/// A singer with a bounded energy level and a fixed voice version.
///
/// Energy starts at [`MAX_ENERGY`] and only ever goes down, through
/// [`DigitalDiva::consume_energy`]. Reads and writes of the level go through
/// a `RwLock`, so any number of tasks may share one diva behind an `Arc`.
///
/// `T` is the value type of the free-form metadata map. The diva never looks
/// at it.
pub struct DigitalDiva<T = String> {
    name: String,
    energy: RwLock<u32>,
    voice_bank: VoiceBank,
    metadata: HashMap<String, T>,
    pacing: Duration,
    console: Console,
}

impl<T> DigitalDiva<T> {
    pub fn new(name: impl Into<String>, voice_bank: VoiceBank) -> Self {
        Self {
            name: name.into(),
            energy: RwLock::new(MAX_ENERGY),
            voice_bank,
            metadata: HashMap::new(),
            pacing: DEFAULT_PACING,
            console: Console::stdout(),
        }
    }

    /// Redirect performance lines (stdout by default).
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    /// Delay between songs in [`DigitalDiva::perform_async`].
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: T) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn metadata(&self, key: &str) -> Option<&T> {
        self.metadata.get(key)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn voice_bank(&self) -> &VoiceBank {
        &self.voice_bank
    }

    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    pub async fn energy(&self) -> u32 {
        *self.energy.read().await
    }

    /// Spend `amount` energy, saturating at zero.
    pub async fn consume_energy(&self, amount: u32) {
        let mut energy = self.energy.write().await;
        *energy = energy.saturating_sub(amount);
        debug!(diva = %self.name, amount, remaining = *energy, "energy consumed");
    }

    fn voice(&self, song: &str) {
        let label = self.voice_bank.version.voice_label();
        self.console.line(&format!("{label}: {song}"));
    }
}

impl<T: Send + Sync + 'static> DigitalDiva<T> {
    /// Sing `setlist` in the background, one song at a time.
    ///
    /// See [`Performance::start`]; the pacing is the diva's own.
    pub fn perform_async(self: &Arc<Self>, ctx: &Context, setlist: Vec<String>) -> Performance {
        Performance::start(Arc::clone(self), ctx.clone(), setlist, self.pacing)
    }
}

#[async_trait]
impl<T: Send + Sync> Synthesizer for DigitalDiva<T> {
    async fn sing(&self, ctx: &Context, song: &str) -> Result<(), PerformError> {
        let energy = self.energy().await;
        if energy < LOW_ENERGY_THRESHOLD {
            return Err(PerformError::LowEnergy);
        }

        if ctx.is_cancelled() {
            return Err(PerformError::Cancelled);
        }

        self.console.line(&format!("[MIKU] Now singing: {song}"));
        debug!(diva = %self.name, version = %self.voice_bank.version, song, "dispatching voice");
        self.voice(song);
        Ok(())
    }

    fn version(&self) -> MikuVersion {
        self.voice_bank.version
    }
}

impl<T> std::fmt::Debug for DigitalDiva<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitalDiva")
            .field("name", &self.name)
            .field("voice_bank", &self.voice_bank)
            .field("pacing", &self.pacing)
            .finish_non_exhaustive()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
