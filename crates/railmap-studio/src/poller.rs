use std::path::PathBuf;
use std::time::{Duration, Instant};

use railmap_engine::time::Interval;
use railmap_trains::{SnapshotError, TrainsResponse};

/// Re-reads a snapshot file on a fixed period.
///
/// A failed read keeps the previous snapshot on screen. Each distinct failure is
/// logged once; the next successful read is logged as a recovery.
#[derive(Debug)]
pub struct SnapshotPoller {
    path: PathBuf,
    interval: Interval,
    last_error: Option<String>,
}

impl SnapshotPoller {
    pub fn new(path: PathBuf, period: Duration) -> Self {
        log::debug!("polling {} every {period:?}", path.display());
        Self { path, interval: Interval::new(period), last_error: None }
    }

    /// Reads the snapshot if a period has elapsed. `None` when not due or unreadable.
    pub fn poll(&mut self, now: Instant) -> Option<TrainsResponse> {
        if !self.interval.due(now) {
            return None;
        }
        self.read()
    }

    /// Reads the snapshot immediately and restarts the period.
    pub fn refresh(&mut self, now: Instant) -> Option<TrainsResponse> {
        self.interval.trigger();
        self.poll(now)
    }

    fn read(&mut self) -> Option<TrainsResponse> {
        match TrainsResponse::load(&self.path) {
            Ok(snapshot) => {
                if self.last_error.take().is_some() {
                    log::info!("snapshot {} readable again", self.path.display());
                }
                log::trace!("polled {} train(s)", snapshot.trains.len());
                Some(snapshot)
            }
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    fn report(&mut self, err: &SnapshotError) {
        let msg = err.to_string();
        if self.last_error.as_deref() != Some(msg.as_str()) {
            log::warn!("{msg}; keeping previous trains");
            self.last_error = Some(msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn temp_snapshot(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("railmap-poller-{}-{name}.json", std::process::id()));
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn reads_on_first_poll_then_waits() {
        let path = temp_snapshot("wait", r#"{"trains":[{"id":"a"}]}"#);
        let mut poller = SnapshotPoller::new(path.clone(), Duration::from_secs(2));
        let t0 = Instant::now();

        assert_eq!(poller.poll(t0).map(|s| s.trains.len()), Some(1));
        assert!(poller.poll(t0 + Duration::from_secs(1)).is_none());
        assert!(poller.poll(t0 + Duration::from_secs(2)).is_some());
        fs::remove_file(path).ok();
    }

    #[test]
    fn refresh_ignores_the_period() {
        let path = temp_snapshot("refresh", r#"{"trains":[]}"#);
        let mut poller = SnapshotPoller::new(path.clone(), Duration::from_secs(60));
        let t0 = Instant::now();

        poller.poll(t0);
        assert!(poller.refresh(t0).is_some());
        fs::remove_file(path).ok();
    }

    #[test]
    fn unreadable_snapshot_yields_nothing_and_recovers() {
        let path = temp_snapshot("recover", "{ not json");
        let mut poller = SnapshotPoller::new(path.clone(), Duration::ZERO);
        let t0 = Instant::now();

        assert!(poller.poll(t0).is_none());
        assert!(poller.last_error.is_some());

        fs::write(&path, r#"{"trains":[]}"#).unwrap();
        assert!(poller.poll(t0).is_some());
        assert!(poller.last_error.is_none());
        fs::remove_file(path).ok();
    }
}
