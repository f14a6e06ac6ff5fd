// Core build pipeline: data model, context, pass pipeline, orchestrator
pub mod context;
pub mod interfaces;
pub mod models;
pub mod passes;
pub mod services;
