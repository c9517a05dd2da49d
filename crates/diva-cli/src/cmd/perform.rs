use crate::output::print_json;
use crate::stage::{self, StageOptions};
use anyhow::Result;
use diva_core::{Console, PerformanceReport};
use futures::StreamExt;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct PerformOutput {
    lines: Vec<String>,
    #[serde(flatten)]
    report: PerformanceReport,
}

/// Perform `songs` (or the configured setlist when none are given).
///
/// Fails if the performance stopped early. With `json`, the diva's lines are
/// captured and printed together with the report instead of streamed.
pub fn run(opts: &StageOptions, songs: Vec<String>, json: bool) -> Result<()> {
    let cfg = stage::checked_config(opts)?;
    let songs = if songs.is_empty() {
        cfg.setlist.clone()
    } else {
        songs
    };
    let songs = stage::setlist(&songs)?;

    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(async move {
        if json {
            let (console, captured) = Console::capture();
            let miku = Arc::new(stage::build_diva(&cfg, console).await);
            let ctx = stage::show_context(&cfg);
            let report = miku.perform_async(&ctx, songs).collect_outcome().await;
            print_json(&PerformOutput {
                lines: captured.lines(),
                report: report.clone(),
            })?;
            return anyhow::Ok(report);
        }

        let miku = Arc::new(stage::build_diva(&cfg, Console::stdout()).await);
        let ctx = stage::show_context(&cfg);
        let mut report = PerformanceReport::default();
        let mut show = miku.perform_async(&ctx, songs);
        while let Some(outcome) = show.next().await {
            match outcome {
                Ok(()) => report.sung += 1,
                Err(e) => {
                    println!("Performance error: {e}");
                    report.error = Some(e);
                }
            }
        }
        anyhow::Ok(report)
    })?;

    if let Some(e) = report.error {
        anyhow::bail!("performance stopped after {} song(s): {e}", report.sung);
    }
    Ok(())
}
