pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod ingest;
pub mod report;
