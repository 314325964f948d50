pub mod cli;
pub mod config;
pub mod constants;
pub mod doctor;
pub mod service;
pub mod supervisor;
pub mod unit;
pub mod venv;

pub use anyhow::Result;
