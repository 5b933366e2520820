//! Diesel implementation of [`ArgumentStore`] on [`Session`].

use diesel::connection::TransactionManager;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use tracing::warn;

use super::backend::{DbConnection, LAST_INSERT_ID_SQL};
use super::row::{AduRow, DomainRow, NewAduRow, NewDomainRow, NewRelationshipRow, RelationshipRow};
use super::schema::{adus, domains, relationships};
use super::session::Session;
use crate::error::{Error, Result};
use crate::model::{Adu, AduId, AduKind, Domain, NewAdu, NewDomain, NewRelationship, Relationship};
use crate::store::{ArgumentStore, CorpusCounts, LinkedPremise};

/// Upper bound on ids bound into a single `IN (...)` list.
const MAX_IN_LIST: usize = 10_000;

fn last_insert_id(conn: &mut DbConnection) -> Result<i32> {
    let id: i64 = diesel::select(sql::<BigInt>(LAST_INSERT_ID_SQL)).get_result(conn)?;
    i32::try_from(id).map_err(|e| Error::Database(format!("inserted id {id} out of range: {e}")))
}

fn count_kind(conn: &mut DbConnection, kind: AduKind) -> Result<i64> {
    Ok(adus::table
        .filter(adus::kind.eq(kind.as_str()))
        .count()
        .get_result(conn)?)
}

impl ArgumentStore for Session {
    fn domains(&mut self) -> Result<Vec<Domain>> {
        let rows: Vec<DomainRow> = domains::table
            .order(domains::id.asc())
            .select(DomainRow::as_select())
            .load(self.connection())?;
        Ok(rows.into_iter().map(Domain::from).collect())
    }

    fn domain_by_name(&mut self, name: &str) -> Result<Option<Domain>> {
        let row = domains::table
            .filter(domains::domain_name.eq(name))
            .select(DomainRow::as_select())
            .first::<DomainRow>(self.connection())
            .optional()?;
        Ok(row.map(Domain::from))
    }

    fn insert_domains(&mut self, new: &[NewDomain]) -> Result<usize> {
        if new.is_empty() {
            return Ok(0);
        }
        let rows: Vec<NewDomainRow<'_>> = new.iter().map(NewDomainRow::from).collect();
        Ok(diesel::insert_into(domains::table)
            .values(&rows)
            .execute(self.connection())?)
    }

    fn adus(&mut self) -> Result<Vec<Adu>> {
        Session::adus(self)
    }

    fn find_adu(&mut self, id: AduId) -> Result<Option<Adu>> {
        adus::table
            .find(id)
            .select(AduRow::as_select())
            .first::<AduRow>(self.connection())
            .optional()?
            .map(Adu::try_from)
            .transpose()
    }

    fn insert_adu(&mut self, adu: &NewAdu) -> Result<Adu> {
        let row = NewAduRow::from(adu);
        let inserted = self.transaction(|conn| {
            diesel::insert_into(adus::table).values(&row).execute(conn)?;
            let id = last_insert_id(conn)?;
            Ok(adus::table
                .find(id)
                .select(AduRow::as_select())
                .first::<AduRow>(conn)?)
        })?;
        Adu::try_from(inserted)
    }

    fn insert_adus(&mut self, new: &[NewAdu]) -> Result<usize> {
        if new.is_empty() {
            return Ok(0);
        }
        let rows: Vec<NewAduRow<'_>> = new.iter().map(NewAduRow::from).collect();
        Ok(diesel::insert_into(adus::table)
            .values(&rows)
            .execute(self.connection())?)
    }

    fn count_claims(&mut self) -> Result<i64> {
        count_kind(self.connection(), AduKind::Claim)
    }

    fn claims_page(&mut self, offset: i64, limit: i64) -> Result<Vec<Adu>> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        let rows: Vec<AduRow> = adus::table
            .filter(adus::kind.eq(AduKind::Claim.as_str()))
            .order(adus::id.asc())
            .limit(limit)
            .offset(offset.max(0))
            .select(AduRow::as_select())
            .load(self.connection())?;
        rows.into_iter().map(Adu::try_from).collect()
    }

    fn premises_for_claims(&mut self, claim_ids: &[AduId]) -> Result<Vec<LinkedPremise>> {
        let mut linked = Vec::new();
        for chunk in claim_ids.chunks(MAX_IN_LIST) {
            let rows: Vec<(AduRow, String, i32)> = adus::table
                .inner_join(relationships::table.on(relationships::from_adu_id.eq(adus::id)))
                .filter(adus::kind.eq(AduKind::Premise.as_str()))
                .filter(relationships::to_adu_id.eq_any(chunk.to_vec()))
                .order(relationships::id.asc())
                .select((
                    AduRow::as_select(),
                    relationships::category,
                    relationships::to_adu_id,
                ))
                .load(self.connection())?;

            for (row, category, claim_id) in rows {
                linked.push(LinkedPremise {
                    premise: Adu::try_from(row)?,
                    category: category.parse()?,
                    claim_id,
                });
            }
        }
        Ok(linked)
    }

    fn relationships(&mut self) -> Result<Vec<Relationship>> {
        let rows: Vec<RelationshipRow> = relationships::table
            .order(relationships::id.asc())
            .select(RelationshipRow::as_select())
            .load(self.connection())?;
        rows.into_iter().map(Relationship::try_from).collect()
    }

    fn insert_relationship(&mut self, relationship: &NewRelationship) -> Result<Relationship> {
        let row = NewRelationshipRow::from(relationship);
        let inserted = self.transaction(|conn| {
            diesel::insert_into(relationships::table)
                .values(&row)
                .execute(conn)?;
            let id = last_insert_id(conn)?;
            Ok(relationships::table
                .find(id)
                .select(RelationshipRow::as_select())
                .first::<RelationshipRow>(conn)?)
        })?;
        Relationship::try_from(inserted)
    }

    fn insert_relationships(&mut self, new: &[NewRelationship]) -> Result<usize> {
        if new.is_empty() {
            return Ok(0);
        }
        let rows: Vec<NewRelationshipRow> = new.iter().map(NewRelationshipRow::from).collect();
        Ok(diesel::insert_into(relationships::table)
            .values(&rows)
            .execute(self.connection())?)
    }

    fn counts(&mut self) -> Result<CorpusCounts> {
        let conn = self.connection();
        Ok(CorpusCounts {
            domains: domains::table.count().get_result(conn)?,
            claims: count_kind(conn, AduKind::Claim)?,
            premises: count_kind(conn, AduKind::Premise)?,
            relationships: relationships::table.count().get_result(conn)?,
        })
    }

    fn in_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        type Manager = <DbConnection as Connection>::TransactionManager;

        Manager::begin_transaction(self.connection())?;
        match f(self) {
            Ok(value) => {
                Manager::commit_transaction(self.connection())?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = Manager::rollback_transaction(self.connection()) {
                    warn!(error = %rollback, "rollback failed");
                }
                Err(err)
            }
        }
    }
}
