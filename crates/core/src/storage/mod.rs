//! SQLite persistence through sea-orm.

pub mod connection;
pub mod entity;

pub use connection::establish_connection;
