//! Typed records for the argument-mining schema.
//!
//! These are the values callers work with. The Diesel row structs that map
//! them onto tables live in [`crate::db::row`].

pub mod adu;
pub mod domain;
pub mod relationship;

pub use adu::{Adu, AduId, AduKind, NewAdu};
pub use domain::{Domain, DomainId, NewDomain};
pub use relationship::{NewRelationship, RelationCategory, Relationship};
