pub mod error;
pub mod extract;
pub mod types;

pub use error::*;
pub use extract::*;
pub use types::*;
