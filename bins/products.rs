use dotenvy::dotenv;
use tracing::info;

use server::routes::products;
use server::startup::build_cors;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 提前加载 .env，使得 RUST_LOG 等环境变量生效
    dotenv().ok();
    common::utils::logging::init_logging_default();
    info!(service = "products", event = "start", version = env!("CARGO_PKG_VERSION"), "products service starting");

    let catalog = products::seed_collection();
    let app = products::router(catalog, build_cors());
    server::serve("products", app, 3000).await
}
