//! Deterministic synthetic dataset generation
//!
//! Global invariants enforced:
//! - Identical parameters yield byte-for-byte identical tables
//! - The generated table is sorted ascending by timestamp
//! - The table is immutable once built (no mutating API)

use crate::record::{AlertRecord, Reason};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Fixed row count of the generated table
pub const DEFAULT_COUNT: usize = 15_000;

/// 2020-01-01T00:00:00Z (window start, inclusive)
pub const DEFAULT_WINDOW_START_SECS: i64 = 1_577_836_800;

/// 2025-06-30T00:00:00Z (window end, exclusive)
pub const DEFAULT_WINDOW_END_SECS: i64 = 1_751_241_600;

/// Parameters for dataset generation
///
/// The system runs with the fixed defaults; custom values exist for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorParams {
    pub seed: u64,
    /// Inclusive lower bound of the timestamp draw range
    pub window_start: DateTime<Utc>,
    /// Exclusive upper bound of the timestamp draw range
    pub window_end: DateTime<Utc>,
    pub count: usize,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        GeneratorParams {
            seed: DEFAULT_SEED,
            window_start: utc_from_secs(DEFAULT_WINDOW_START_SECS),
            window_end: utc_from_secs(DEFAULT_WINDOW_END_SECS),
            count: DEFAULT_COUNT,
        }
    }
}

/// The generated alert table, immutable once built
#[derive(Debug, Clone)]
pub struct AlertTable {
    params: GeneratorParams,
    records: Vec<AlertRecord>,
}

impl AlertTable {
    /// Generate the table from the given parameters.
    ///
    /// Draws `count` uniform integer-second samples in `[start, end)` with
    /// replacement, sorts them ascending, then assigns each row a weighted
    /// categorical reason. All draws come from a single seeded RNG, so the
    /// result is fully determined by the parameters.
    pub fn generate(params: GeneratorParams) -> AlertTable {
        debug_assert!(params.window_start < params.window_end);

        let mut rng = StdRng::seed_from_u64(params.seed);
        let start = params.window_start.timestamp();
        let end = params.window_end.timestamp();

        let mut seconds: Vec<i64> = (0..params.count)
            .map(|_| rng.gen_range(start..end))
            .collect();
        seconds.sort_unstable();

        // Reasons are drawn after sorting, one per row in timestamp order
        let records: Vec<AlertRecord> = seconds
            .into_iter()
            .map(|secs| AlertRecord {
                timestamp: utc_from_secs(secs),
                reason: sample_reason(&mut rng),
            })
            .collect();

        AlertTable { params, records }
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    pub fn records(&self) -> &[AlertRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Draw one reason using the fixed percent weights (cumulative thresholds)
fn sample_reason(rng: &mut StdRng) -> Reason {
    let draw = rng.gen_range(0..100u32);
    let mut cumulative = 0;
    for (reason, weight) in Reason::ALL.iter().zip(Reason::WEIGHTS_PERCENT) {
        cumulative += weight;
        if draw < cumulative {
            return *reason;
        }
    }
    // Unreachable: the weights sum to exactly 100
    Reason::PendingSignature
}

/// Convert integer seconds to a UTC timestamp.
/// Draw values are bounded by the window, which chrono can always represent.
fn utc_from_secs(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
