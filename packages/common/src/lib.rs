pub mod download;
pub mod error;
pub mod filesystem;
pub mod result;

pub use download::*;
pub use error::*;
pub use filesystem::*;
pub use result::*;
