use crate::error::Result;
use crate::types::{MikuVersion, VoiceBank, DEFAULT_PACING, DEFAULT_TIMEOUT, MAX_ENERGY};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// DivaConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivaConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_voice_bank")]
    pub voice_bank: String,
    #[serde(default)]
    pub version: MikuVersion,
    #[serde(default = "default_frequency_range")]
    pub frequency_range: (u32, u32),
}

fn default_name() -> String {
    "Miku".to_string()
}

fn default_voice_bank() -> String {
    "Hatsune Miku".to_string()
}

fn default_frequency_range() -> (u32, u32) {
    (80, 1100)
}

impl Default for DivaConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            voice_bank: default_voice_bank(),
            version: MikuVersion::default(),
            frequency_range: default_frequency_range(),
        }
    }
}

// ---------------------------------------------------------------------------
// StageConfig (top-level)
// ---------------------------------------------------------------------------

/// Everything needed to put on a show. Every field has a default, so an
/// empty file (or no file at all) is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    #[serde(default)]
    pub diva: DivaConfig,
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_opening_song")]
    pub opening_song: String,
    #[serde(default = "default_setlist")]
    pub setlist: Vec<String>,
    /// Energy spent before the diva goes on stage.
    #[serde(default)]
    pub drain: u32,
}

fn default_pacing_ms() -> u64 {
    DEFAULT_PACING.as_millis() as u64
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_opening_song() -> String {
    "World is Mine".to_string()
}

fn default_setlist() -> Vec<String> {
    vec![
        "Melt".to_string(),
        "Love is War".to_string(),
        "Rolling Girl".to_string(),
    ]
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            diva: DivaConfig::default(),
            pacing_ms: default_pacing_ms(),
            timeout_secs: default_timeout_secs(),
            opening_song: default_opening_song(),
            setlist: default_setlist(),
            drain: 0,
        }
    }
}

impl StageConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: StageConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, data)?;
        Ok(())
    }

    pub fn voice_bank(&self) -> VoiceBank {
        VoiceBank {
            name: self.diva.voice_bank.clone(),
            version: self.diva.version,
            frequency_range: self.diva.frequency_range,
        }
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        // 1. A zero timeout cancels the show before the first note
        if self.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "timeout_secs is 0: every song would be cancelled".to_string(),
            });
        }

        // 2. Frequency range must be low..=high
        let (low, high) = self.diva.frequency_range;
        if low > high {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("diva.frequency_range is inverted: {low} > {high}"),
            });
        }

        // 3. Blank titles
        if self.opening_song.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "opening_song is blank".to_string(),
            });
        }
        for (i, song) in self.setlist.iter().enumerate() {
            if song.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("setlist[{i}] is blank"),
                });
            }
        }

        // 4. Legal but probably unintended
        if self.setlist.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "setlist is empty: only the opening song will be sung".to_string(),
            });
        }
        if self.pacing_ms == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "pacing_ms is 0: songs will run back to back".to_string(),
            });
        }
        if self.drain >= MAX_ENERGY {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "drain {} empties the diva: every song will fail with low energy",
                    self.drain
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
