// src/core/mod.rs
pub mod alphabet;
pub mod chain;
pub mod engine;
pub mod registry;
pub mod structural;
pub mod substitution;
pub mod types;
