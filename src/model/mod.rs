//! Problem data model.
//!
//! An [`Instance`] holds `n` [`Variable`]s, each with a score-sorted list
//! of candidate [`ParentSet`]s, and `m` [`Ancestral`] constraints. All of it
//! is immutable once loaded; the search only reads it.
//!
//! # Key Types
//!
//! - [`Score`]: finite integer score or the `Infeasible` marker
//! - [`ParentSet`]: one candidate parent set with membership bitset
//! - [`Variable`]: sorted candidates plus a reverse "contains parent" index
//! - [`Instance`]: variables and constraints, validated on construction
//! - [`InstanceLoader`]: reader for the score file format

mod instance;
pub mod loader;
mod score;
mod variable;

pub use instance::{Ancestral, Instance, ModelError};
pub use loader::{InstanceLoader, LoadError};
pub use score::Score;
pub use variable::{ParentSet, VarId, Variable};
