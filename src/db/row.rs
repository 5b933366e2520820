//! Database row types for Diesel ORM.
//!
//! Enum columns are stored as strings; reading an unknown value back is a
//! [`Error::Parse`].

use diesel::prelude::*;

use super::backend::Backend;
use super::schema::{adus, domains, relationships};
use crate::error::{Error, Result};
use crate::model::{Adu, Domain, NewAdu, NewDomain, NewRelationship, Relationship};

/// Database row for a domain.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = domains)]
#[diesel(check_for_backend(Backend))]
pub struct DomainRow {
    pub id: i32,
    pub domain_name: String,
}

/// Database row for a domain (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = domains)]
pub struct NewDomainRow<'a> {
    pub domain_name: &'a str,
}

/// Database row for an ADU.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = adus)]
#[diesel(check_for_backend(Backend))]
pub struct AduRow {
    pub id: i32,
    pub text: String,
    pub kind: String,
    pub domain_id: i32,
}

/// Database row for an ADU (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = adus)]
pub struct NewAduRow<'a> {
    pub text: &'a str,
    pub kind: &'static str,
    pub domain_id: i32,
}

/// Database row for a relationship.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = relationships)]
#[diesel(check_for_backend(Backend))]
pub struct RelationshipRow {
    pub id: i32,
    pub from_adu_id: i32,
    pub to_adu_id: i32,
    pub category: String,
    pub domain_id: i32,
}

/// Database row for a relationship (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = relationships)]
pub struct NewRelationshipRow {
    pub from_adu_id: i32,
    pub to_adu_id: i32,
    pub category: &'static str,
    pub domain_id: i32,
}

impl From<DomainRow> for Domain {
    fn from(row: DomainRow) -> Self {
        Self {
            id: row.id,
            domain_name: row.domain_name,
        }
    }
}

impl<'a> From<&'a NewDomain> for NewDomainRow<'a> {
    fn from(domain: &'a NewDomain) -> Self {
        Self {
            domain_name: &domain.domain_name,
        }
    }
}

impl TryFrom<AduRow> for Adu {
    type Error = Error;

    fn try_from(row: AduRow) -> Result<Self> {
        Ok(Self {
            kind: row.kind.parse()?,
            id: row.id,
            text: row.text,
            domain_id: row.domain_id,
        })
    }
}

impl<'a> From<&'a NewAdu> for NewAduRow<'a> {
    fn from(adu: &'a NewAdu) -> Self {
        Self {
            text: &adu.text,
            kind: adu.kind.as_str(),
            domain_id: adu.domain_id,
        }
    }
}

impl TryFrom<RelationshipRow> for Relationship {
    type Error = Error;

    fn try_from(row: RelationshipRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            from_adu_id: row.from_adu_id,
            to_adu_id: row.to_adu_id,
            category: row.category.parse()?,
            domain_id: row.domain_id,
        })
    }
}

impl From<&NewRelationship> for NewRelationshipRow {
    fn from(rel: &NewRelationship) -> Self {
        Self {
            from_adu_id: rel.from_adu_id,
            to_adu_id: rel.to_adu_id,
            category: rel.category.as_str(),
            domain_id: rel.domain_id,
        }
    }
}
