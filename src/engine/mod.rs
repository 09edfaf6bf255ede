// Task engine: load-mutate-persist operations over the record store

pub mod ops;
pub mod outcome;

pub use ops::*;
pub use outcome::*;
