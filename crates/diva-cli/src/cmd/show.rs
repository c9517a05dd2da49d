use crate::stage::{self, StageOptions};
use anyhow::Result;
use diva_core::{normalize_title, with_logging, Console, Synthesizer};
use futures::StreamExt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// The full show: sing the opening song, then perform the setlist.
///
/// Failures of the diva are part of the show and are printed, not returned.
/// Only setup problems (config, runtime) make this fail.
pub fn run(opts: &StageOptions) -> Result<()> {
    let cfg = stage::checked_config(opts)?;
    let opening = with_logging(normalize_title)(cfg.opening_song.as_str())?;
    let songs = stage::setlist(&cfg.setlist)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let miku = Arc::new(stage::build_diva(&cfg, Console::stdout()).await);
        let ctx = stage::show_context(&cfg);

        if let Err(e) = miku.sing(&ctx, &opening).await {
            println!("Error: {e}");
            return Ok(());
        }

        let mut show = miku.perform_async(&ctx, songs);
        while let Some(outcome) = show.next().await {
            if let Err(e) = outcome {
                println!("Performance error: {e}");
            }
        }

        println!("Performance complete!");
        Ok(())
    })
}
