//! Read queries over claims and premises.
//!
//! Claims are partitioned by id order into [`Split`]s. For each split the
//! crate offers the claims themselves and [`TrainingExample`]s pairing a
//! claim with one of its premises. [`QueryCache`] keeps both on disk keyed
//! by the current claim count.

pub mod cache;
pub mod example;
pub mod shard;
pub mod split;

pub use cache::QueryCache;
pub use example::{claims, examples, select_examples, TrainingExample};
pub use shard::{shard, sharded_training_examples};
pub use split::Split;
