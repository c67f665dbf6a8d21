pub mod caption;
pub mod metadata;

pub use caption::*;
pub use metadata::*;
