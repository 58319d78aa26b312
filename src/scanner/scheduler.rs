//! Polling loop control

use super::{CycleReport, Scanner};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Reports buffered between the loop and its consumer
const REPORT_BUFFER: usize = 16;

/// Scheduler errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// `start` called while a loop is active
    #[error("Polling loop already running")]
    AlreadyRunning,
}

struct RunningLoop {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<Scanner>,
}

/// Repeats scan cycles on a fixed pause until stopped
///
/// The pause is measured from the end of one cycle to the start of the
/// next, so cycles never overlap.
pub struct Scheduler {
    interval: Duration,
    running: Option<RunningLoop>,
}

impl Scheduler {
    /// Create a stopped scheduler
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a polling loop is active
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }

    /// Start polling with `scanner`; reports arrive on the returned channel
    ///
    /// The scanner's warning log is cleared first. The loop also ends on its
    /// own if the receiver is dropped.
    pub fn start(
        &mut self,
        scanner: Scanner,
    ) -> Result<mpsc::Receiver<CycleReport>, SchedulerError> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        let (shutdown, shutdown_rx) = watch::channel(false);
        let (report_tx, report_rx) = mpsc::channel(REPORT_BUFFER);
        let handle = tokio::spawn(run_loop(scanner, self.interval, shutdown_rx, report_tx));

        self.running = Some(RunningLoop { shutdown, handle });
        tracing::info!(interval_secs = self.interval.as_secs(), "Polling loop started");

        Ok(report_rx)
    }

    /// Stop polling and hand the scanner back
    ///
    /// An in-flight cycle runs to completion; a pause between cycles ends
    /// immediately. Returns `None` if nothing was running or the loop
    /// panicked.
    pub async fn stop(&mut self) -> Option<Scanner> {
        let running = self.running.take()?;
        // Fails only if the loop already exited
        let _ = running.shutdown.send(true);

        match running.handle.await {
            Ok(scanner) => {
                tracing::info!(cycles = scanner.status().cycles, "Polling loop stopped");
                Some(scanner)
            }
            Err(e) => {
                tracing::error!(error = %e, "Polling loop terminated abnormally");
                None
            }
        }
    }
}

async fn run_loop(
    mut scanner: Scanner,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
    reports: mpsc::Sender<CycleReport>,
) -> Scanner {
    scanner.clear_warnings();

    loop {
        if *shutdown.borrow() {
            break;
        }

        let report = scanner.run_cycle().await;

        // Shutdown wins over delivery when both are ready
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            sent = reports.send(report) => {
                if sent.is_err() {
                    tracing::debug!("Report receiver dropped, stopping loop");
                    break;
                }
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            changed = shutdown.changed() => {
                // Scheduler dropped without stop()
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    scanner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanSettings;
    use crate::feed::{FeedError, MarketFeed, StaticFeed};
    use crate::market::{RawRecord, Venue};
    use serde_json::json;
    use tokio::sync::{oneshot, Mutex};
    use tokio::time::Instant;
    use tokio_test::{assert_err, assert_ok};

    fn scanner() -> Scanner {
        let kalshi = StaticFeed::from_json(
            Venue::Kalshi,
            json!([{"ticker": "K", "title": "fed cuts rates", "yes_bid": 30}]),
        );
        let polymarket = StaticFeed::from_json(
            Venue::Polymarket,
            json!([{"id": "P", "question": "Fed cuts rates?", "bestBid": 0.45}]),
        );
        Scanner::new(
            Box::new(kalshi),
            Box::new(polymarket),
            &ScanSettings::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycles_spaced_by_interval() {
        let mut scheduler = Scheduler::new(Duration::from_secs(10));
        let mut reports = assert_ok!(scheduler.start(scanner()));
        assert!(scheduler.is_running());

        let first = reports.recv().await.unwrap();
        let first_at = Instant::now();
        assert_eq!(first.status.cycles, 1);
        assert_eq!(first.edges.len(), 1);
        assert_eq!(first.edges[0].edge_bps, 1500);

        let second = reports.recv().await.unwrap();
        assert_eq!(second.status.cycles, 2);
        assert!(Instant::now() - first_at >= Duration::from_secs(10));

        scheduler.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_rejected() {
        let mut scheduler = Scheduler::new(Duration::from_secs(5));
        let _reports = assert_ok!(scheduler.start(scanner()));

        let second = scheduler.start(scanner());
        assert!(matches!(
            assert_err!(second),
            SchedulerError::AlreadyRunning
        ));

        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_between_cycles() {
        let mut scheduler = Scheduler::new(Duration::from_secs(60));
        let mut reports = assert_ok!(scheduler.start(scanner()));

        reports.recv().await.unwrap();
        let scanner = scheduler.stop().await.unwrap();

        assert!(!scheduler.is_running());
        assert_eq!(scanner.status().cycles, 1);
        assert!(reports.recv().await.is_none());
    }

    struct GatedFeed {
        inner: StaticFeed,
        entered: Mutex<Option<oneshot::Sender<()>>>,
        release: Mutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait::async_trait]
    impl MarketFeed for GatedFeed {
        fn venue(&self) -> Venue {
            self.inner.venue()
        }

        async fn fetch_records(&self) -> Result<Vec<RawRecord>, FeedError> {
            if let Some(entered) = self.entered.lock().await.take() {
                let _ = entered.send(());
            }
            if let Some(release) = self.release.lock().await.take() {
                let _ = release.await;
            }
            self.inner.fetch_records().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_dropped_when_stopped_mid_cycle() {
        let (entered_tx, entered_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        let kalshi = GatedFeed {
            inner: StaticFeed::from_json(Venue::Kalshi, json!([])),
            entered: Mutex::new(Some(entered_tx)),
            release: Mutex::new(Some(release_rx)),
        };
        let scanner = Scanner::new(
            Box::new(kalshi),
            Box::new(StaticFeed::from_json(Venue::Polymarket, json!([]))),
            &ScanSettings::default(),
        );

        let mut scheduler = Scheduler::new(Duration::from_secs(5));
        let mut reports = assert_ok!(scheduler.start(scanner));
        entered_rx.await.unwrap();

        // Shutdown lands while the first cycle is still fetching
        let running = scheduler.running.take().unwrap();
        running.shutdown.send(true).unwrap();
        release_tx.send(()).unwrap();

        let scanner = running.handle.await.unwrap();
        assert_eq!(scanner.status().cycles, 1);
        assert!(reports.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_stop_when_idle() {
        let mut scheduler = Scheduler::new(Duration::from_secs(5));
        assert!(!scheduler.is_running());
        assert!(scheduler.stop().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_stop() {
        let mut scheduler = Scheduler::new(Duration::from_secs(5));
        let mut reports = assert_ok!(scheduler.start(scanner()));
        reports.recv().await.unwrap();

        let scanner = scheduler.stop().await.unwrap();
        let mut reports = assert_ok!(scheduler.start(scanner));

        let report = reports.recv().await.unwrap();
        assert_eq!(report.status.cycles, 2);
        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_ends_when_receiver_dropped() {
        let mut scheduler = Scheduler::new(Duration::from_secs(5));
        let reports = assert_ok!(scheduler.start(scanner()));
        drop(reports);

        // First report send fails, loop exits on its own
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!scheduler.is_running());
        assert!(scheduler.stop().await.is_some());
    }
}
