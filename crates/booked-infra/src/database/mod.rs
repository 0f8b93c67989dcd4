//! Stores: in-memory, and PostgreSQL via SeaORM.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_repo;
#[cfg(feature = "postgres")]
mod schema;

pub use connections::DatabaseConfig;
pub use memory::InMemoryStore;

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresStore;
#[cfg(feature = "postgres")]
pub use schema::create_tables;
