//! Live KPI simulation feed
//!
//! A bounded, time-paced sequence of KPI snapshots for visual refresh only;
//! the values are random perturbations of bases captured once at feed start,
//! not derived from any real alert stream. Single-threaded and cooperative:
//! the consumer renders each snapshot before the next pacing delay begins.
//! Cancellation is external (drop the iterator).

use crate::filter::FilteredView;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of snapshots one feed produces
pub const DEFAULT_TICKS: usize = 200;

/// Default pacing interval between snapshots
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2_500);

/// Feed bounds, explicit so tests can shrink them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveFeedConfig {
    pub ticks: usize,
    pub interval: Duration,
}

impl Default for LiveFeedConfig {
    fn default() -> Self {
        LiveFeedConfig {
            ticks: DEFAULT_TICKS,
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Closed set of simulated activity labels, drawn uniformly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLabel {
    #[serde(rename = "Incoming SWIFT")]
    IncomingSwift,
    #[serde(rename = "New Transaction")]
    NewTransaction,
    #[serde(rename = "Validating Docs")]
    ValidatingDocs,
    #[serde(rename = "Low-Priority Risk Alert")]
    LowPriorityRiskAlert,
}

impl ActivityLabel {
    pub const ALL: [ActivityLabel; 4] = [
        ActivityLabel::IncomingSwift,
        ActivityLabel::NewTransaction,
        ActivityLabel::ValidatingDocs,
        ActivityLabel::LowPriorityRiskAlert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLabel::IncomingSwift => "Incoming SWIFT",
            ActivityLabel::NewTransaction => "New Transaction",
            ActivityLabel::ValidatingDocs => "Validating Docs",
            ActivityLabel::LowPriorityRiskAlert => "Low-Priority Risk Alert",
        }
    }

    fn sample(rng: &mut StdRng) -> ActivityLabel {
        ActivityLabel::ALL[rng.gen_range(0..ActivityLabel::ALL.len())]
    }
}

/// One KPI snapshot of the simulated feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct KpiSnapshot {
    /// 0-indexed position in the feed
    pub tick: usize,
    pub total: i64,
    pub critical: i64,
    /// The random perturbation applied to the total, kept for delta display
    pub delta_total: i64,
    pub activity: ActivityLabel,
    pub captured_at: DateTime<Utc>,
}

/// Pacing seam: the feed suspends through this before yielding each
/// snapshot after the first. Production uses a blocking sleep; tests
/// record the requested pauses instead.
pub trait Pacer {
    fn pause(&mut self, interval: Duration);
}

/// Blocking pacer backed by `std::thread::sleep`
#[derive(Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }
}

/// Finite iterator of KPI snapshots, bound to one invocation.
///
/// Snapshot `i` carries `total = base_total + i + U[-2, 5)` and
/// `critical = base_critical + U[0, 2)`. Bases are captured at construction
/// and never recomputed; filter changes during a running feed have no
/// effect, matching the capture-once contract.
pub struct LiveFeed<P: Pacer> {
    base_total: i64,
    base_critical: i64,
    config: LiveFeedConfig,
    rng: StdRng,
    pacer: P,
    tick: usize,
}

impl<P: Pacer> LiveFeed<P> {
    /// Build a feed from explicit bases
    pub fn from_bases(
        base_total: usize,
        base_critical: usize,
        config: LiveFeedConfig,
        rng: StdRng,
        pacer: P,
    ) -> Self {
        LiveFeed {
            base_total: base_total as i64,
            base_critical: base_critical as i64,
            config,
            rng,
            pacer,
            tick: 0,
        }
    }

    /// Build a feed whose bases are captured from a filtered view
    pub fn for_view(view: &FilteredView, config: LiveFeedConfig, rng: StdRng, pacer: P) -> Self {
        let base_critical = crate::aggregate::critical_count(view);
        Self::from_bases(view.len(), base_critical, config, rng, pacer)
    }
}

impl<P: Pacer> Iterator for LiveFeed<P> {
    type Item = KpiSnapshot;

    fn next(&mut self) -> Option<KpiSnapshot> {
        if self.tick >= self.config.ticks {
            return None;
        }
        // The first snapshot is immediate; every later one follows a pause
        if self.tick > 0 {
            self.pacer.pause(self.config.interval);
        }

        let tick = self.tick;
        self.tick += 1;

        let delta_total = self.rng.gen_range(-2..5);
        let delta_critical = self.rng.gen_range(0..2);

        Some(KpiSnapshot {
            tick,
            total: self.base_total + tick as i64 + delta_total,
            critical: self.base_critical + delta_critical,
            delta_total,
            activity: ActivityLabel::sample(&mut self.rng),
            captured_at: Utc::now(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.config.ticks - self.tick;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    /// Records requested pauses instead of sleeping
    #[derive(Debug, Default)]
    struct RecordingPacer {
        pauses: Vec<Duration>,
    }

    impl Pacer for &mut RecordingPacer {
        fn pause(&mut self, interval: Duration) {
            self.pauses.push(interval);
        }
    }

    fn test_config(ticks: usize) -> LiveFeedConfig {
        LiveFeedConfig {
            ticks,
            interval: Duration::from_millis(2_500),
        }
    }

    #[test]
    fn test_feed_yields_exactly_ticks_snapshots() {
        let mut pacer = RecordingPacer::default();
        let feed = LiveFeed::from_bases(
            100,
            20,
            test_config(200),
            StdRng::seed_from_u64(1),
            &mut pacer,
        );
        assert_eq!(feed.count(), 200);
    }

    #[test]
    fn test_snapshot_bounds() {
        let base_total = 500usize;
        let base_critical = 40usize;
        let mut pacer = RecordingPacer::default();
        let feed = LiveFeed::from_bases(
            base_total,
            base_critical,
            test_config(200),
            StdRng::seed_from_u64(9),
            &mut pacer,
        );

        for snapshot in feed {
            let i = snapshot.tick as i64;
            let base = base_total as i64;
            assert!(snapshot.total >= base + i - 2, "tick {}", snapshot.tick);
            assert!(snapshot.total <= base + i + 4, "tick {}", snapshot.tick);
            assert!(snapshot.critical >= base_critical as i64);
            assert!(snapshot.critical <= base_critical as i64 + 1);
        }
    }

    #[test]
    fn test_pacing_happens_between_snapshots_only() {
        let mut pacer = RecordingPacer::default();
        let feed = LiveFeed::from_bases(
            10,
            2,
            test_config(5),
            StdRng::seed_from_u64(3),
            &mut pacer,
        );
        let snapshots: Vec<KpiSnapshot> = feed.collect();
        assert_eq!(snapshots.len(), 5);
        // 5 snapshots, 4 pauses: none before the first
        assert_eq!(pacer.pauses.len(), 4);
        assert!(pacer
            .pauses
            .iter()
            .all(|p| *p == Duration::from_millis(2_500)));
    }

    #[test]
    fn test_feed_is_not_restartable() {
        let mut pacer = RecordingPacer::default();
        let mut feed = LiveFeed::from_bases(
            10,
            2,
            test_config(3),
            StdRng::seed_from_u64(4),
            &mut pacer,
        );
        assert!(feed.next().is_some());
        assert!(feed.next().is_some());
        assert!(feed.next().is_some());
        assert!(feed.next().is_none());
        assert!(feed.next().is_none());
    }

    #[test]
    fn test_activity_labels_from_closed_set() {
        let mut pacer = RecordingPacer::default();
        let feed = LiveFeed::from_bases(
            10,
            2,
            test_config(100),
            StdRng::seed_from_u64(5),
            &mut pacer,
        );
        for snapshot in feed {
            assert!(ActivityLabel::ALL.contains(&snapshot.activity));
        }
    }

    #[test]
    fn test_size_hint_tracks_remaining() {
        let mut pacer = RecordingPacer::default();
        let mut feed = LiveFeed::from_bases(
            10,
            2,
            test_config(3),
            StdRng::seed_from_u64(6),
            &mut pacer,
        );
        assert_eq!(feed.size_hint(), (3, Some(3)));
        feed.next();
        assert_eq!(feed.size_hint(), (2, Some(2)));
    }
}
