//! Fixed-size shards of the training examples.

use super::cache::QueryCache;
use super::example::TrainingExample;
use super::split::Split;
use crate::error::{Error, Result};
use crate::store::ArgumentStore;

/// Cut `examples` into `num_shards` consecutive shards of exactly
/// `max_per_shard` examples each. Examples past the last shard are dropped.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] if either count is zero or there are
/// fewer than `max_per_shard * num_shards` examples.
pub fn shard(
    examples: &[TrainingExample],
    max_per_shard: usize,
    num_shards: usize,
) -> Result<Vec<Vec<TrainingExample>>> {
    if max_per_shard == 0 || num_shards == 0 {
        return Err(Error::InvalidArgument(
            "max_per_shard and num_shards must be positive".to_string(),
        ));
    }
    let required = max_per_shard.checked_mul(num_shards).ok_or_else(|| {
        Error::InvalidArgument("max_per_shard * num_shards overflows".to_string())
    })?;
    if examples.len() < required {
        return Err(Error::InvalidArgument(format!(
            "not enough training data: need {required}, have {}",
            examples.len()
        )));
    }

    Ok(examples[..required]
        .chunks(max_per_shard)
        .map(<[TrainingExample]>::to_vec)
        .collect())
}

/// Training examples (through `cache`) cut into shards.
///
/// # Errors
/// Propagates store errors and the argument errors of [`shard`].
pub fn sharded_training_examples<S: ArgumentStore + ?Sized>(
    store: &mut S,
    cache: &QueryCache,
    max_per_shard: usize,
    num_shards: usize,
) -> Result<Vec<Vec<TrainingExample>>> {
    if max_per_shard == 0 || num_shards == 0 {
        return Err(Error::InvalidArgument(
            "max_per_shard and num_shards must be positive".to_string(),
        ));
    }
    let examples = cache.examples(store, Split::Training)?;
    shard(&examples, max_per_shard, num_shards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Adu, AduKind, RelationCategory};

    fn example(i: i32) -> TrainingExample {
        let adu = |id, kind| Adu {
            id,
            text: format!("{i}"),
            kind,
            domain_id: 1,
        };
        TrainingExample {
            claim: adu(i, AduKind::Claim),
            premise: adu(i + 1000, AduKind::Premise),
            category: RelationCategory::StancePro,
        }
    }

    #[test]
    fn shards_are_consecutive_and_full() {
        let examples: Vec<_> = (0..7).map(example).collect();
        let shards = shard(&examples, 3, 2).unwrap();
        assert_eq!(shards.len(), 2);
        let ids: Vec<Vec<i32>> = shards
            .iter()
            .map(|s| s.iter().map(|e| e.claim.id).collect())
            .collect();
        assert_eq!(ids, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    }

    #[test]
    fn rejects_zero_sizes() {
        let examples: Vec<_> = (0..4).map(example).collect();
        assert!(matches!(
            shard(&examples, 0, 2),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            shard(&examples, 2, 0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_insufficient_data() {
        let examples: Vec<_> = (0..5).map(example).collect();
        let err = shard(&examples, 3, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument: not enough training data: need 6, have 5"
        );
    }

    #[test]
    fn sharded_training_examples_validates_before_querying() {
        let mut store = crate::store::MemoryStore::new();
        let result = sharded_training_examples(&mut store, &QueryCache::disabled(), 0, 1);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
