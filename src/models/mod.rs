// Core data model for Log Work
// A record is the only persisted entity

pub mod record;

pub use record::*;
