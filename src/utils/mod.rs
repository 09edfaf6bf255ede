pub mod date;
pub mod duration;
pub mod name;

pub use date::*;
pub use duration::*;
pub use name::*;
