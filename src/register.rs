//! Recording of candidate solutions.
//!
//! The genetic search reports every initial individual and every new
//! best-ever result to a [`ResultRegister`]. [`Recorder`] is the in-memory
//! implementation used by the CLI and the tests.

use crate::model::Score;
use crate::ordering::Ordering;
use std::time::{Duration, Instant};
use tracing::info;

/// Sink for candidate solutions found during a search.
pub trait ResultRegister {
    /// Time since the register was started.
    fn elapsed(&self) -> Duration;

    /// Stores a candidate solution.
    fn record(&mut self, score: Score, ordering: &Ordering);
}

/// One recorded candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub elapsed: Duration,
    pub score: Score,
    pub ordering: Ordering,
}

/// Keeps every record in memory and logs it at `info`.
#[derive(Debug, Clone)]
pub struct Recorder {
    start: Instant,
    records: Vec<Record>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    /// Starts the clock now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Best record so far; the earliest one wins ties.
    pub fn best(&self) -> Option<&Record> {
        self.records
            .iter()
            .reduce(|best, r| if r.score < best.score { r } else { best })
    }
}

impl ResultRegister for Recorder {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn record(&mut self, score: Score, ordering: &Ordering) {
        let elapsed = self.elapsed();
        info!(
            elapsed_ms = elapsed.as_millis() as u64,
            score = %score,
            ordering = %ordering,
            "record"
        );
        self.records.push(Record {
            elapsed,
            score,
            ordering: ordering.clone(),
        });
    }
}
