use crate::stage::{self, StageOptions};
use anyhow::{Context as _, Result};
use diva_core::{normalize_title, with_logging, Console, Synthesizer};

pub fn run(opts: &StageOptions, song: &str) -> Result<()> {
    let cfg = stage::checked_config(opts)?;
    let title = with_logging(normalize_title)(song)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let miku = stage::build_diva(&cfg, Console::stdout()).await;
        let ctx = stage::show_context(&cfg);
        miku.sing(&ctx, &title)
            .await
            .with_context(|| format!("{} could not sing '{title}'", miku.name()))
    })
}
