pub mod batch;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod metrics;
pub mod process;
pub mod scheduler;
pub mod variates;
