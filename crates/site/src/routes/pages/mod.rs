pub mod list;
pub mod load;

pub use list::*;
pub use load::*;
