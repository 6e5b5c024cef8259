//! Terminal front end: wires the pure session state to the job engine.
mod app;
mod config;
mod effects;
mod render;
mod workflow;

pub use app::run_app;
