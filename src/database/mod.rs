pub mod connection;

pub use connection::{DbPool, create_pool, ping, run_migrations};
