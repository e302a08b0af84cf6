//! Database models and queries

pub mod init;
pub mod models;
pub mod submissions;

pub use init::*;
pub use models::*;
pub use submissions::*;
