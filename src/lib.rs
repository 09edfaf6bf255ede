//! Log Work - record when named tasks start and stop, and report how long they took
//!
//! All state lives in a flat text file with one `<name> <start_ts> <end_ts>`
//! line per record. This library provides:
//! - The record model and the flat-file record store
//! - The task engine: start, stop, switch, change, remove and print
//! - Timestamp and work-time duration formatting
//! - The command-line front end
//!
//! # Example
//!
//! ```no_run
//! use logwork::engine;
//! use logwork::store::RecordStore;
//!
//! fn main() -> logwork::error::Result<()> {
//!     let store = RecordStore::new("db.txt");
//!     engine::start(&store, Some("Write"))?;
//!     let stopped = engine::stop(&store, Some("Write"))?;
//!     println!("stopped {} task(s)", stopped.len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
pub mod utils;
