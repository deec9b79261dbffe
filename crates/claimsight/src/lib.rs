//! Claim intake, simulated risk assessment, and approval-likelihood reporting.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
