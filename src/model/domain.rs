//! Discussion domains (topics).

use serde::{Deserialize, Serialize};

/// Database identity of a domain.
pub type DomainId = i32;

/// A discussion topic that ADUs and relationships belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: DomainId,
    pub domain_name: String,
}

/// A domain that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDomain {
    pub domain_name: String,
}

impl NewDomain {
    #[must_use]
    pub fn new(domain_name: impl Into<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
        }
    }
}
