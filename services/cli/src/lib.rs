mod cli;
mod commands;
mod demo;
mod infra;
mod render;

use claimsight::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
