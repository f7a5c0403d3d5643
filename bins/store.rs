use dotenvy::dotenv;
use tracing::info;

use server::routes::store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_default();
    info!(service = "store", event = "start", version = env!("CARGO_PKG_VERSION"), "store service starting");

    let items = store::seed_collection();
    let app = store::router(items);
    server::serve("store", app, 3000).await
}
