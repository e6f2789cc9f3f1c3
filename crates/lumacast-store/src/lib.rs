//! PostgreSQL-backed persistence for the show aggregate.

pub mod pg_show_store;
pub mod schema;

pub use pg_show_store::PgShowStore;
