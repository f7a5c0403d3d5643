use dotenvy::dotenv;
use tracing::info;

use server::routes::students;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_default();
    info!(service = "students", event = "start", version = env!("CARGO_PKG_VERSION"), "students service starting");

    let roster = students::seed_collection();
    let app = students::router(roster);
    server::serve("students", app, 3000).await
}
