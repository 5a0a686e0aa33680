// src/lib.rs

pub mod console;
pub mod materialize;
pub mod orchestrator;
pub mod plan;
pub mod planner;
pub mod prompts;
pub mod session;
