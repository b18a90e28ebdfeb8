pub mod edit;
pub mod init;
pub mod render;

pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
