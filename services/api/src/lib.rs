mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use hvac_quote::error::AppError;

pub use infra::{AppState, InMemoryLeadRepository, InMemoryPromoCodeRepository};
pub use server::build_app;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
