pub mod dataset;
pub mod entities;
pub mod macros;
pub mod schedule;
pub mod time;

pub use dataset::*;
pub use entities::*;
pub use schedule::*;
pub use time::*;
