pub mod path;
pub mod records;

pub use path::*;
pub use records::*;
