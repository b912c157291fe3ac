mod cli;
mod infra;
mod rank;
mod routes;
mod server;

use school_locator::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
