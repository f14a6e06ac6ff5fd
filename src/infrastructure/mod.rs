// Infrastructure layer
pub mod backend;
pub mod file_system;

pub use backend::*;
pub use file_system::*;
