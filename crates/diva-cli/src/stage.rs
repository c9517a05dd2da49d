use anyhow::Context as _;
use diva_core::{
    normalize_title, prepare_setlist, with_logging, Console, Context, DigitalDiva, MikuVersion,
    StageConfig, WarnLevel,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Global CLI flags that shape the stage.
#[derive(Debug, Default)]
pub struct StageOptions {
    pub config: Option<PathBuf>,
    pub voice: Option<String>,
    pub timeout_secs: Option<u64>,
    pub pacing_ms: Option<u64>,
    pub drain: Option<u32>,
}

const DEFAULT_CONFIG_FILE: &str = "stage.yaml";

/// Resolve the stage config.
///
/// Priority:
/// 1. `--config` flag / `DIVA_CONFIG` env var (must exist)
/// 2. `./stage.yaml` if present
/// 3. Built-in defaults
///
/// Flag overrides are applied on top of whichever source won.
pub fn load_config(opts: &StageOptions) -> anyhow::Result<StageConfig> {
    let mut cfg = match &opts.config {
        Some(path) => StageConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            StageConfig::load(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("failed to load config {DEFAULT_CONFIG_FILE}"))?
        }
        None => StageConfig::default(),
    };

    if let Some(voice) = &opts.voice {
        cfg.diva.version = voice.parse::<MikuVersion>()?;
    }
    if let Some(secs) = opts.timeout_secs {
        cfg.timeout_secs = secs;
    }
    if let Some(ms) = opts.pacing_ms {
        cfg.pacing_ms = ms;
    }
    if let Some(drain) = opts.drain {
        cfg.drain = drain;
    }
    Ok(cfg)
}

/// Validation results for a resolved config, split by severity.
#[derive(Debug, Default, Serialize)]
pub struct Findings {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Findings {
    pub fn of(cfg: &StageConfig) -> Self {
        let mut findings = Self::default();
        for w in cfg.validate() {
            match w.level {
                WarnLevel::Warning => findings.warnings.push(w.message),
                WarnLevel::Error => findings.errors.push(w.message),
            }
        }
        findings
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Load the config and refuse to go on stage if it has errors.
/// Warnings are logged and the show goes on.
pub fn checked_config(opts: &StageOptions) -> anyhow::Result<StageConfig> {
    let cfg = load_config(opts)?;
    let findings = Findings::of(&cfg);
    for w in &findings.warnings {
        tracing::warn!("{w}");
    }
    if !findings.errors.is_empty() {
        anyhow::bail!("invalid stage config: {}", findings.errors.join("; "));
    }
    Ok(cfg)
}

/// Build the diva described by `cfg`, spending its drain up front.
pub async fn build_diva(cfg: &StageConfig, console: Console) -> DigitalDiva<String> {
    let diva = DigitalDiva::new(cfg.diva.name.clone(), cfg.voice_bank())
        .with_pacing(cfg.pacing())
        .with_console(console);
    if cfg.drain > 0 {
        diva.consume_energy(cfg.drain).await;
    }
    let energy = diva.energy().await;
    tracing::info!(
        diva = %diva.name(),
        voice_bank = %diva.voice_bank().name,
        version = %diva.voice_bank().version,
        energy,
        "diva on stage"
    );
    diva
}

/// A context bound to the show's deadline that is also cancelled on Ctrl-C.
pub fn show_context(cfg: &StageConfig) -> Context {
    let ctx = Context::background().with_timeout(cfg.timeout());
    let on_signal = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling performance");
            on_signal.cancel();
        }
    });
    ctx
}

/// Normalize every title, logging each one.
pub fn setlist(songs: &[String]) -> anyhow::Result<Vec<String>> {
    Ok(prepare_setlist(songs, with_logging(normalize_title))?)
}
