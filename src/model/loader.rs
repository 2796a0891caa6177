//! Text loader for precomputed parent-set score files.
//!
//! The format is a stream of whitespace-separated tokens:
//!
//! ```text
//! n
//! var_id candidate_count          (repeated n times, in any id order)
//!   score size member*            (candidate_count times)
//!   m                             (constraint block, follows every variable)
//!   x y                           (m times: x must be an ancestor of y)
//! ```
//!
//! Scores are local fit values (higher = better fit). They are multiplied by
//! [`SCORE_SCALE`] and truncated toward zero, so the search minimises an
//! integer score.
//!
//! The constraint block is repeated after every variable. All blocks are
//! read to stay aligned with the stream; the last one wins, and a warning is
//! logged if blocks disagree.

use super::instance::{Ancestral, Instance, ModelError};
use super::variable::{ParentSet, VarId, Variable};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Multiplier applied to raw scores before truncation.
pub const SCORE_SCALE: f64 = -1_000_000.0;

/// Errors raised while reading an instance.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),
    #[error("could not parse token '{token}' as {expected}")]
    Parse {
        token: String,
        expected: &'static str,
    },
    #[error("score {raw} of variable {var} is not representable after scaling")]
    ScoreOutOfRange { var: VarId, raw: f64 },
    #[error("invalid instance: {0}")]
    Model(#[from] ModelError),
}

/// Reads [`Instance`]s from the score file format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceLoader {
    score_scale: f64,
}

impl Default for InstanceLoader {
    fn default() -> Self {
        Self {
            score_scale: SCORE_SCALE,
        }
    }
}

impl InstanceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the score multiplier. Must be negative for files whose
    /// scores are "higher is better".
    pub fn with_score_scale(mut self, scale: f64) -> Self {
        self.score_scale = scale;
        self
    }

    /// Loads an instance from a buffered reader.
    ///
    /// Counts in the stream are not trusted for allocation: parent-set
    /// bitsets are only built once all `n` variables have actually been
    /// read.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Instance, LoadError> {
        let mut sc = Scanner::new(rdr);

        let n: usize = sc.next("variable count")?;
        let mut raw_vars: Vec<(VarId, Vec<(i64, Vec<VarId>)>)> = Vec::new();
        let mut constraints: Option<Vec<Ancestral>> = None;

        for _ in 0..n {
            let var_id: VarId = sc.next("variable id")?;
            if var_id >= n {
                return Err(ModelError::VariableOutOfRange { id: var_id, n }.into());
            }
            let count: usize = sc.next("candidate count")?;

            let mut candidates = Vec::new();
            for _ in 0..count {
                let score = self.scale(var_id, sc.next("score")?)?;
                let size: usize = sc.next("parent set size")?;
                let mut parents = Vec::new();
                for _ in 0..size {
                    let p: VarId = sc.next("parent id")?;
                    if p >= n {
                        return Err(ModelError::MemberOutOfRange {
                            var: var_id,
                            member: p,
                            n,
                        }
                        .into());
                    }
                    parents.push(p);
                }
                candidates.push((score, parents));
            }
            raw_vars.push((var_id, candidates));

            let m: usize = sc.next("constraint count")?;
            let mut block = Vec::new();
            for _ in 0..m {
                let x: VarId = sc.next("constraint ancestor")?;
                let y: VarId = sc.next("constraint descendant")?;
                block.push(Ancestral::new(x, y));
            }
            if let Some(prev) = &constraints {
                if *prev != block {
                    warn!(
                        variable = var_id,
                        "constraint block differs from the previous one; keeping the latest"
                    );
                }
            }
            constraints = Some(block);
        }

        let total_sets: usize = raw_vars.iter().map(|(_, c)| c.len()).sum();
        debug!(n, parent_sets = total_sets, "read instance");

        let variables = raw_vars
            .into_iter()
            .map(|(id, cands)| {
                let sets = cands
                    .into_iter()
                    .map(|(score, parents)| ParentSet::new(id, score, parents, n))
                    .collect();
                Variable::new(id, sets)
            })
            .collect();
        Ok(Instance::new(variables, constraints.unwrap_or_default())?)
    }

    /// Applies the score scale, rejecting values that are not finite or do
    /// not fit an `i64` after scaling.
    fn scale(&self, var: VarId, raw: f64) -> Result<i64, LoadError> {
        let scaled = raw * self.score_scale;
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
            return Err(LoadError::ScoreOutOfRange { var, raw });
        }
        Ok(scaled as i64)
    }

    /// Loads an instance from a file path.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Instance, LoadError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from any reader.
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Instance, LoadError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an instance from a string slice.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(&self, s: &str) -> Result<Instance, LoadError> {
        self.from_reader(s.as_bytes())
    }
}

/// Whitespace tokenizer over a line reader.
struct Scanner<R> {
    rdr: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Scanner<R> {
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            pending: VecDeque::new(),
        }
    }

    fn next<T: FromStr>(&mut self, what: &'static str) -> Result<T, LoadError> {
        let token = loop {
            if let Some(tok) = self.pending.pop_front() {
                break tok;
            }
            let mut line = String::new();
            if self.rdr.read_line(&mut line)? == 0 {
                return Err(LoadError::UnexpectedEof(what));
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        };
        token.parse::<T>().map_err(|_| LoadError::Parse {
            token,
            expected: what,
        })
    }
}
