//! In-memory store implementation for testing.
//!
//! Mirrors the constraints of the real schema: unique domain names and
//! foreign keys from ADUs and relationships.

use crate::error::{Error, Result};
use crate::model::{
    Adu, AduId, AduKind, Domain, DomainId, NewAdu, NewDomain, NewRelationship, Relationship,
};

use super::{ArgumentStore, CorpusCounts, LinkedPremise};

/// In-memory store for testing purposes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    domains: Vec<Domain>,
    adus: Vec<Adu>,
    relationships: Vec<Relationship>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(len: usize) -> Result<i32> {
        i32::try_from(len + 1).map_err(|e| Error::Database(e.to_string()))
    }

    fn check_domain(&self, id: DomainId) -> Result<()> {
        if self.domains.iter().any(|d| d.id == id) {
            Ok(())
        } else {
            Err(Error::Database(format!(
                "FOREIGN KEY constraint failed: domain {id}"
            )))
        }
    }

    fn check_adu(&self, id: AduId) -> Result<()> {
        if self.adus.iter().any(|a| a.id == id) {
            Ok(())
        } else {
            Err(Error::Database(format!(
                "FOREIGN KEY constraint failed: adu {id}"
            )))
        }
    }

    fn count_kind(&self, kind: AduKind) -> i64 {
        self.adus.iter().filter(|a| a.kind == kind).count() as i64
    }
}

impl ArgumentStore for MemoryStore {
    fn domains(&mut self) -> Result<Vec<Domain>> {
        Ok(self.domains.clone())
    }

    fn domain_by_name(&mut self, name: &str) -> Result<Option<Domain>> {
        Ok(self.domains.iter().find(|d| d.domain_name == name).cloned())
    }

    fn insert_domains(&mut self, domains: &[NewDomain]) -> Result<usize> {
        for (i, new) in domains.iter().enumerate() {
            let name = &new.domain_name;
            let duplicate = self.domains.iter().any(|d| &d.domain_name == name)
                || domains[..i].iter().any(|d| &d.domain_name == name);
            if duplicate {
                return Err(Error::Database(format!(
                    "UNIQUE constraint failed: domains.domain_name = '{}'",
                    new.domain_name
                )));
            }
        }
        for new in domains {
            let id = Self::next_id(self.domains.len())?;
            self.domains.push(Domain {
                id,
                domain_name: new.domain_name.clone(),
            });
        }
        Ok(domains.len())
    }

    fn adus(&mut self) -> Result<Vec<Adu>> {
        Ok(self.adus.clone())
    }

    fn find_adu(&mut self, id: AduId) -> Result<Option<Adu>> {
        Ok(self.adus.iter().find(|a| a.id == id).cloned())
    }

    fn insert_adu(&mut self, adu: &NewAdu) -> Result<Adu> {
        self.check_domain(adu.domain_id)?;
        let stored = Adu {
            id: Self::next_id(self.adus.len())?,
            text: adu.text.clone(),
            kind: adu.kind,
            domain_id: adu.domain_id,
        };
        self.adus.push(stored.clone());
        Ok(stored)
    }

    fn insert_adus(&mut self, adus: &[NewAdu]) -> Result<usize> {
        for adu in adus {
            self.check_domain(adu.domain_id)?;
        }
        for adu in adus {
            self.insert_adu(adu)?;
        }
        Ok(adus.len())
    }

    fn count_claims(&mut self) -> Result<i64> {
        Ok(self.count_kind(AduKind::Claim))
    }

    fn claims_page(&mut self, offset: i64, limit: i64) -> Result<Vec<Adu>> {
        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(self
            .adus
            .iter()
            .filter(|a| a.is_claim())
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn premises_for_claims(&mut self, claim_ids: &[AduId]) -> Result<Vec<LinkedPremise>> {
        let mut linked = Vec::new();
        for rel in &self.relationships {
            if !claim_ids.contains(&rel.to_adu_id) {
                continue;
            }
            let Some(premise) = self
                .adus
                .iter()
                .find(|a| a.id == rel.from_adu_id && a.kind == AduKind::Premise)
            else {
                continue;
            };
            linked.push(LinkedPremise {
                premise: premise.clone(),
                category: rel.category,
                claim_id: rel.to_adu_id,
            });
        }
        Ok(linked)
    }

    fn relationships(&mut self) -> Result<Vec<Relationship>> {
        Ok(self.relationships.clone())
    }

    fn insert_relationship(&mut self, relationship: &NewRelationship) -> Result<Relationship> {
        self.check_adu(relationship.from_adu_id)?;
        self.check_adu(relationship.to_adu_id)?;
        self.check_domain(relationship.domain_id)?;
        let stored = Relationship {
            id: Self::next_id(self.relationships.len())?,
            from_adu_id: relationship.from_adu_id,
            to_adu_id: relationship.to_adu_id,
            category: relationship.category,
            domain_id: relationship.domain_id,
        };
        self.relationships.push(stored.clone());
        Ok(stored)
    }

    fn insert_relationships(&mut self, relationships: &[NewRelationship]) -> Result<usize> {
        for rel in relationships {
            self.check_adu(rel.from_adu_id)?;
            self.check_adu(rel.to_adu_id)?;
            self.check_domain(rel.domain_id)?;
        }
        for rel in relationships {
            self.insert_relationship(rel)?;
        }
        Ok(relationships.len())
    }

    fn counts(&mut self) -> Result<CorpusCounts> {
        Ok(CorpusCounts {
            domains: self.domains.len() as i64,
            claims: self.count_kind(AduKind::Claim),
            premises: self.count_kind(AduKind::Premise),
            relationships: self.relationships.len() as i64,
        })
    }

    fn in_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let snapshot = self.clone();
        let result = f(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }
}
