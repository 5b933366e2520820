// Mirrors the tables created by the embedded migrations.

diesel::table! {
    adus (id) {
        id -> Integer,
        text -> Text,
        #[sql_name = "type"]
        kind -> Varchar,
        domain_id -> Integer,
    }
}

diesel::table! {
    domains (id) {
        id -> Integer,
        domain_name -> Varchar,
    }
}

diesel::table! {
    relationships (id) {
        id -> Integer,
        from_adu_id -> Integer,
        to_adu_id -> Integer,
        category -> Varchar,
        domain_id -> Integer,
    }
}

diesel::joinable!(adus -> domains (domain_id));
diesel::joinable!(relationships -> domains (domain_id));

diesel::allow_tables_to_appear_in_same_query!(adus, domains, relationships);
