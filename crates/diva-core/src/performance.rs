use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context as TaskContext, Poll};
use std::time::Duration;

use futures::{Stream, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::context::Context;
use crate::diva::Synthesizer;
use crate::error::PerformError;

// ─── Performance ──────────────────────────────────────────────────────────

/// The outcomes of a setlist, one per song attempted, as they happen.
///
/// Backed by a bounded Tokio mpsc channel sized to the setlist. A background
/// task sings each song in order and forwards its outcome. It stops after the
/// first failure, so an `Err` is always the last item. Dropping the
/// `Performance` closes the receiver, which makes the background task exit on
/// its next send.
///
/// ```rust,ignore
/// use diva_core::{Context, DigitalDiva, VoiceBank, MikuVersion};
/// use futures::StreamExt;
///
/// let miku = Arc::new(DigitalDiva::<String>::new("Miku", VoiceBank::new("Hatsune Miku", MikuVersion::NT)));
/// let mut show = miku.perform_async(&Context::background(), vec!["Melt".into()]);
/// while let Some(outcome) = show.next().await {
///     if let Err(e) = outcome {
///         eprintln!("Performance error: {e}");
///     }
/// }
/// ```
pub struct Performance {
    rx: mpsc::Receiver<Result<(), PerformError>>,
}

impl Performance {
    /// Start singing `setlist` on a background task and return immediately.
    ///
    /// `pacing` is waited between songs (not after the last one). The wait
    /// ends early if `ctx` is cancelled, and the next song then reports
    /// [`PerformError::Cancelled`].
    pub fn start<S>(synth: Arc<S>, ctx: Context, setlist: Vec<String>, pacing: Duration) -> Self
    where
        S: Synthesizer + ?Sized + 'static,
    {
        // mpsc::channel panics on a zero capacity.
        let (tx, rx) = mpsc::channel(setlist.len().max(1));

        tokio::spawn(async move {
            info!(songs = setlist.len(), version = %synth.version(), "performance started");
            let total = setlist.len();

            for (i, song) in setlist.iter().enumerate() {
                if i > 0 && !pacing.is_zero() {
                    tokio::select! {
                        _ = tokio::time::sleep(pacing) => {}
                        _ = ctx.cancelled() => debug!("pacing interrupted by cancellation"),
                    }
                }

                let outcome = synth.sing(&ctx, song).await;
                let failed = outcome.is_err();
                if let Err(e) = outcome {
                    warn!(song = %song, error = %e, "performance stopped");
                }
                if tx.send(outcome).await.is_err() {
                    debug!("performance receiver dropped");
                    return; // Receiver dropped
                }
                if failed {
                    return;
                }
            }

            info!(songs = total, "performance finished");
        });

        Performance { rx }
    }

    /// Drain the remaining outcomes into a [`PerformanceReport`].
    pub async fn collect_outcome(mut self) -> PerformanceReport {
        let mut report = PerformanceReport::default();
        while let Some(outcome) = self.next().await {
            match outcome {
                Ok(()) => report.sung += 1,
                Err(e) => report.error = Some(e),
            }
        }
        report
    }
}

impl Stream for Performance {
    type Item = Result<(), PerformError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl std::fmt::Debug for Performance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Performance").finish_non_exhaustive()
    }
}

// ─── PerformanceReport ────────────────────────────────────────────────────

/// Summary of a finished performance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PerformanceReport {
    /// Songs that completed successfully.
    pub sung: usize,
    /// The failure that ended the performance early, if any.
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<PerformError>,
}

impl PerformanceReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

fn serialize_error<S: serde::Serializer>(
    error: &Option<PerformError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Console;
    use crate::diva::DigitalDiva;
    use crate::types::{MikuVersion, VoiceBank};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Records every song it is asked to sing and fails on the listed ones.
    struct Scripted {
        fail_on: Vec<(&'static str, PerformError)>,
        attempts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(fail_on: Vec<(&'static str, PerformError)>) -> Arc<Self> {
            Arc::new(Self {
                fail_on,
                attempts: Mutex::new(Vec::new()),
            })
        }

        fn attempts(&self) -> Vec<String> {
            self.attempts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Synthesizer for Scripted {
        async fn sing(&self, _ctx: &Context, song: &str) -> Result<(), PerformError> {
            self.attempts.lock().unwrap().push(song.to_string());
            match self.fail_on.iter().find(|(s, _)| *s == song) {
                Some((_, e)) => Err(*e),
                None => Ok(()),
            }
        }

        fn version(&self) -> MikuVersion {
            MikuVersion::V3
        }
    }

    fn setlist(songs: &[&str]) -> Vec<String> {
        songs.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn all_songs_succeed_in_order() {
        let synth = Scripted::new(vec![]);
        let perf = Performance::start(
            Arc::clone(&synth),
            Context::background(),
            setlist(&["A", "B", "C"]),
            Duration::from_millis(100),
        );
        let outcomes: Vec<_> = perf.collect().await;
        assert_eq!(outcomes, vec![Ok(()), Ok(()), Ok(())]);
        assert_eq!(synth.attempts(), vec!["A", "B", "C"]);
    }

    #[tokio::test(start_paused = true)]
    async fn first_failure_is_last_item_and_stops_the_setlist() {
        let synth = Scripted::new(vec![("B", PerformError::LowEnergy)]);
        let perf = Performance::start(
            Arc::clone(&synth),
            Context::background(),
            setlist(&["A", "B", "C"]),
            Duration::from_millis(100),
        );
        let outcomes: Vec<_> = perf.collect().await;
        assert_eq!(outcomes, vec![Ok(()), Err(PerformError::LowEnergy)]);
        assert_eq!(synth.attempts(), vec!["A", "B"]);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_setlist_ends_immediately() {
        let synth = Scripted::new(vec![]);
        let perf = Performance::start(synth, Context::background(), vec![], Duration::ZERO);
        let report = perf.collect_outcome().await;
        assert_eq!(report, PerformanceReport::default());
        assert!(report.is_success());
    }

    #[tokio::test(start_paused = true)]
    async fn outcomes_arrive_one_pacing_interval_apart() {
        let synth = Scripted::new(vec![]);
        let pacing = Duration::from_millis(100);
        let mut perf = Performance::start(
            Arc::clone(&synth),
            Context::background(),
            setlist(&["A", "B", "C"]),
            pacing,
        );

        let start = Instant::now();
        assert_eq!(perf.next().await, Some(Ok(())));
        assert!(start.elapsed() < pacing);
        assert_eq!(synth.attempts(), vec!["A"]);

        assert_eq!(perf.next().await, Some(Ok(())));
        assert!(start.elapsed() >= pacing);
        assert_eq!(perf.next().await, Some(Ok(())));
        assert!(start.elapsed() >= pacing * 2);
        assert_eq!(perf.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_during_pacing_stops_the_next_song() {
        let (console, captured) = Console::capture();
        let miku = Arc::new(
            DigitalDiva::<String>::new("Miku", VoiceBank::new("Hatsune Miku", MikuVersion::NT))
                .with_console(console)
                .with_pacing(Duration::from_secs(60)),
        );
        let ctx = Context::background();
        let mut perf = miku.perform_async(&ctx, setlist(&["Melt", "Love is War"]));

        assert_eq!(perf.next().await, Some(Ok(())));
        let waited = Instant::now();
        ctx.cancel();
        assert_eq!(perf.next().await, Some(Err(PerformError::Cancelled)));
        assert!(waited.elapsed() < Duration::from_secs(60));
        assert_eq!(perf.next().await, None);
        assert_eq!(
            captured.lines(),
            vec!["[MIKU] Now singing: Melt", "NT Modern: Melt"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_cuts_a_long_setlist_short() {
        let (console, _) = Console::capture();
        let miku = Arc::new(
            DigitalDiva::<String>::new("Miku", VoiceBank::new("Hatsune Miku", MikuVersion::V2Classic))
                .with_console(console),
        );
        let ctx = Context::background().with_timeout(Duration::from_millis(250));
        let report = miku
            .perform_async(&ctx, setlist(&["1", "2", "3", "4", "5"]))
            .collect_outcome()
            .await;
        // Songs at t=0, 100 and 200; the wait before the fourth ends at the deadline.
        assert_eq!(report.sung, 3);
        assert_eq!(report.error, Some(PerformError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn drained_diva_fails_first_song() {
        let (console, captured) = Console::capture();
        let miku = Arc::new(
            DigitalDiva::<String>::new("Miku", VoiceBank::new("Hatsune Miku", MikuVersion::Sekai))
                .with_console(console),
        );
        miku.consume_energy(95).await;
        let report = miku
            .perform_async(&Context::background(), setlist(&["Melt", "Rolling Girl"]))
            .collect_outcome()
            .await;
        assert_eq!(report.sung, 0);
        assert_eq!(report.error, Some(PerformError::LowEnergy));
        assert!(captured.lines().is_empty());
    }

    #[test]
    fn report_serializes_error_as_message() {
        let report = PerformanceReport {
            sung: 1,
            error: Some(PerformError::Cancelled),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sung"], 1);
        assert_eq!(json["error"], "performance cancelled");
    }
}
