// jstyle - configuration-driven style build orchestrator
pub mod cli;
pub mod core;
pub mod infrastructure;
pub mod utils;
