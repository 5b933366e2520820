#![cfg(not(feature = "mysql"))]

mod harness;

use argdb::config::DatabaseSettings;
use argdb::db;
use argdb::error::{ConfigError, Error};
use argdb::model::{AduKind, NewAdu, NewDomain, NewRelationship, RelationCategory};
use argdb::store::ArgumentStore;
use harness::temp_db::TempDb;

#[test]
fn session_on_migrated_database_lists_adus() {
    let db = TempDb::create("list-adus");
    let adus = db::get_db_session(db.engine(), |session| session.adus()).unwrap();
    assert!(adus.is_empty());
}

#[test]
fn engine_without_connection_settings_is_a_config_error() {
    let settings = DatabaseSettings {
        host: String::new(),
        ..DatabaseSettings::default()
    };
    for _ in 0..2 {
        assert!(matches!(
            db::get_engine(&settings),
            Err(Error::Config(ConfigError::MissingField {
                field: "database.host"
            }))
        ));
    }
}

#[test]
fn inserted_adu_reads_back_equal() {
    let db = TempDb::create("round-trip");
    let mut session = db.session();
    session
        .insert_domains(&[NewDomain::new("Nuclear energy")])
        .unwrap();
    let domain = session.domain_by_name("Nuclear energy").unwrap().unwrap();

    let stored = session
        .insert_adu(&NewAdu::claim("Nuclear power should expand", domain.id))
        .unwrap();
    let found = session.find_adu(stored.id).unwrap().unwrap();

    assert_eq!(found, stored);
    assert_eq!(found.kind, AduKind::Claim);
    assert_eq!(found.text, "Nuclear power should expand");
}

#[test]
fn data_survives_across_sessions() {
    let db = TempDb::create("across-sessions");
    {
        let mut session = db.session();
        session.insert_domains(&[NewDomain::new("d")]).unwrap();
        let claim = session.insert_adu(&NewAdu::claim("c", 1)).unwrap();
        let premise = session.insert_adu(&NewAdu::premise("p", 1)).unwrap();
        session
            .insert_relationship(&NewRelationship {
                from_adu_id: premise.id,
                to_adu_id: claim.id,
                category: RelationCategory::StanceCon,
                domain_id: 1,
            })
            .unwrap();
        session.close();
    }

    let counts = db::get_db_session(db.engine(), |session| session.counts()).unwrap();
    assert_eq!(counts.domains, 1);
    assert_eq!(counts.claims, 1);
    assert_eq!(counts.premises, 1);
    assert_eq!(counts.relationships, 1);
}

#[test]
fn ping_answers() {
    let db = TempDb::create("ping");
    assert!(db.session().ping().is_ok());
}

#[test]
fn foreign_keys_are_enforced_on_every_connection() {
    let db = TempDb::create("fk");
    let mut first = db.session();
    let mut second = db.session();
    assert!(first.insert_adu(&NewAdu::premise("orphan", 7)).is_err());
    assert!(second.insert_adu(&NewAdu::premise("orphan", 7)).is_err());
}

#[test]
fn migration_status_round_trip() {
    let db = TempDb::create("migrations");
    assert!(db::pending_migrations(db.engine()).unwrap().is_empty());

    db::revert_last_migration(db.engine()).unwrap();
    assert_eq!(db::pending_migrations(db.engine()).unwrap().len(), 1);

    let applied = db::run_migrations(db.engine()).unwrap();
    assert_eq!(applied.len(), 1);
    let adus = db::get_db_session(db.engine(), |s| s.adus()).unwrap();
    assert!(adus.is_empty());
}
