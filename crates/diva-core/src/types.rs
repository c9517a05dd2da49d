use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The canonical identity teal.
pub const CANONICAL_COLOR: &str = "#39C5BB";
pub const DEFAULT_BPM: u32 = 39;

/// Energy a diva starts with, and the ceiling it can never exceed.
pub const MAX_ENERGY: u32 = 100;
/// Below this level a diva refuses to sing.
pub const LOW_ENERGY_THRESHOLD: u32 = 10;

pub const DEFAULT_PACING: Duration = Duration::from_millis(100);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// MikuVersion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MikuVersion {
    #[default]
    #[serde(rename = "V2_CLASSIC")]
    V2Classic,
    #[serde(rename = "V3")]
    V3,
    #[serde(rename = "V4X")]
    V4X,
    #[serde(rename = "NT")]
    NT,
    #[serde(rename = "SEKAI")]
    Sekai,
    #[serde(rename = "V6_AI")]
    V6AI,
}

impl MikuVersion {
    pub fn all() -> &'static [MikuVersion] {
        &[
            MikuVersion::V2Classic,
            MikuVersion::V3,
            MikuVersion::V4X,
            MikuVersion::NT,
            MikuVersion::Sekai,
            MikuVersion::V6AI,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MikuVersion::V2Classic => "V2_CLASSIC",
            MikuVersion::V3 => "V3",
            MikuVersion::V4X => "V4X",
            MikuVersion::NT => "NT",
            MikuVersion::Sekai => "SEKAI",
            MikuVersion::V6AI => "V6_AI",
        }
    }

    /// The voice a diva of this version sings with.
    ///
    /// Only three versions have a voice of their own. Everything else,
    /// including versions added later, shares the default voice.
    pub fn voice_label(self) -> &'static str {
        match self {
            MikuVersion::V2Classic => "V2 Classic",
            MikuVersion::NT => "NT Modern",
            MikuVersion::Sekai => "SEKAI Stage",
            _ => "Default",
        }
    }
}

impl fmt::Display for MikuVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MikuVersion {
    type Err = crate::error::DivaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MikuVersion::all()
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| crate::error::DivaError::UnknownVersion(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// AppendType
// ---------------------------------------------------------------------------

/// Append voicebanks, in their declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppendType {
    Dark,
    Soft,
    Light,
    Sweet,
    Vivid,
    Solid,
}

const APPEND_NAMES: [&str; 6] = ["dark", "soft", "light", "sweet", "vivid", "solid"];

impl AppendType {
    pub fn all() -> &'static [AppendType] {
        &[
            AppendType::Dark,
            AppendType::Soft,
            AppendType::Light,
            AppendType::Sweet,
            AppendType::Vivid,
            AppendType::Solid,
        ]
    }

    pub fn from_index(index: i64) -> Option<AppendType> {
        usize::try_from(index)
            .ok()
            .and_then(|i| AppendType::all().get(i).copied())
    }

    pub fn as_str(self) -> &'static str {
        APPEND_NAMES[self as usize]
    }
}

impl fmt::Display for AppendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a raw append index; anything outside the declared range is "unknown".
pub fn append_name(index: i64) -> &'static str {
    AppendType::from_index(index)
        .map(AppendType::as_str)
        .unwrap_or("unknown")
}

// ---------------------------------------------------------------------------
// VoiceBank
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceBank {
    pub name: String,
    pub version: MikuVersion,
    /// Lowest and highest frequency in Hz.
    pub frequency_range: (u32, u32),
}

impl VoiceBank {
    pub fn new(name: impl Into<String>, version: MikuVersion) -> Self {
        Self {
            name: name.into(),
            version,
            frequency_range: (80, 1100),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
