//! Chunked inserts, one transaction per chunk.

use tracing::info;

use crate::error::{Error, Result};
use crate::store::ArgumentStore;

/// Rows per transaction when importing large datasets.
pub const DEFAULT_BATCH_SIZE: usize = 5000;

/// Insert `items` in chunks of `size`, committing each chunk separately.
///
/// A failing chunk is rolled back and stops the import; chunks committed
/// before it stay in the database. Returns the number of rows inserted.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] for a zero `size`, otherwise the first
/// insert error.
pub fn commit_in_batches<S, T, F>(
    store: &mut S,
    items: &[T],
    size: usize,
    mut insert: F,
) -> Result<usize>
where
    S: ArgumentStore,
    F: FnMut(&mut S, &[T]) -> Result<usize>,
{
    if size == 0 {
        return Err(Error::InvalidArgument(
            "batch size must be positive".to_string(),
        ));
    }

    let total = items.len();
    let mut saved = 0;
    for (index, batch) in items.chunks(size).enumerate() {
        let batch_num = index + 1;
        let start = index * size + 1;
        let end = index * size + batch.len();
        info!(batch = batch_num, start, end, total, "saving batch");

        saved += store.in_transaction(|s| insert(s, batch))?;
        info!(
            batch = batch_num,
            committed = batch.len(),
            "committed batch"
        );
    }

    info!(total = saved, "all batches committed");
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewAdu, NewDomain};
    use crate::store::MemoryStore;

    #[test]
    fn inserts_everything_in_chunks() {
        let mut store = MemoryStore::new();
        store.insert_domains(&[NewDomain::new("d")]).unwrap();
        let adus: Vec<NewAdu> = (0..7)
            .map(|i| NewAdu::premise(format!("p{i}"), 1))
            .collect();

        let mut calls = Vec::new();
        let saved = commit_in_batches(&mut store, &adus, 3, |s, batch| {
            calls.push(batch.len());
            s.insert_adus(batch)
        })
        .unwrap();

        assert_eq!(saved, 7);
        assert_eq!(calls, vec![3, 3, 1]);
        assert_eq!(store.adus().unwrap().len(), 7);
    }

    #[test]
    fn failed_chunk_keeps_earlier_chunks() {
        let mut store = MemoryStore::new();
        store.insert_domains(&[NewDomain::new("d")]).unwrap();
        let adus = vec![
            NewAdu::premise("ok 1", 1),
            NewAdu::premise("ok 2", 1),
            NewAdu::premise("fine", 1),
            NewAdu::premise("dangling", 99),
        ];

        let result = commit_in_batches(&mut store, &adus, 2, |s, batch| s.insert_adus(batch));
        assert!(result.is_err());
        let texts: Vec<String> = store.adus().unwrap().into_iter().map(|a| a.text).collect();
        assert_eq!(texts, vec!["ok 1", "ok 2"]);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let mut store = MemoryStore::new();
        let result = commit_in_batches(&mut store, &[1, 2, 3], 0, |_, b| Ok(b.len()));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
