//! Persistence operations used by queries and importers.
//!
//! [`ArgumentStore`] is implemented by [`crate::db::Session`] against the
//! real database and by [`MemoryStore`] for tests.

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{
    Adu, AduId, Domain, NewAdu, NewDomain, NewRelationship, RelationCategory, Relationship,
};

pub use memory::MemoryStore;

/// A premise ADU together with the link to the claim it argues about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedPremise {
    pub premise: Adu,
    pub category: RelationCategory,
    pub claim_id: AduId,
}

/// Row counts per table and ADU kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusCounts {
    pub domains: i64,
    pub claims: i64,
    pub premises: i64,
    pub relationships: i64,
}

/// Storage operations for the argument-mining schema.
pub trait ArgumentStore {
    /// All domains, ordered by id.
    fn domains(&mut self) -> Result<Vec<Domain>>;

    /// Look up a domain by its name.
    fn domain_by_name(&mut self, name: &str) -> Result<Option<Domain>>;

    /// Insert domains. Returns the number of rows inserted.
    fn insert_domains(&mut self, domains: &[NewDomain]) -> Result<usize>;

    /// All ADUs, ordered by id.
    fn adus(&mut self) -> Result<Vec<Adu>>;

    /// Look up an ADU by id.
    fn find_adu(&mut self, id: AduId) -> Result<Option<Adu>>;

    /// Insert one ADU and return it with its assigned id.
    fn insert_adu(&mut self, adu: &NewAdu) -> Result<Adu>;

    /// Insert ADUs. Returns the number of rows inserted.
    fn insert_adus(&mut self, adus: &[NewAdu]) -> Result<usize>;

    /// Number of claim ADUs.
    fn count_claims(&mut self) -> Result<i64>;

    /// Claims ordered by id, skipping `offset` and returning at most `limit`.
    fn claims_page(&mut self, offset: i64, limit: i64) -> Result<Vec<Adu>>;

    /// Premises linked to any of `claim_ids`, ordered by relationship id
    /// within each claim.
    fn premises_for_claims(&mut self, claim_ids: &[AduId]) -> Result<Vec<LinkedPremise>>;

    /// All relationships, ordered by id.
    fn relationships(&mut self) -> Result<Vec<Relationship>>;

    /// Insert one relationship and return it with its assigned id.
    fn insert_relationship(&mut self, relationship: &NewRelationship) -> Result<Relationship>;

    /// Insert relationships. Returns the number of rows inserted.
    fn insert_relationships(&mut self, relationships: &[NewRelationship]) -> Result<usize>;

    /// Row counts for a quick overview.
    fn counts(&mut self) -> Result<CorpusCounts>;

    /// Run `f` as one unit: all of its writes are kept if it returns `Ok`
    /// and none of them if it returns `Err`.
    fn in_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>;
}
