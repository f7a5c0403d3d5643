use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use models::Product;
use service::collection::{Collection, EmptyMatch};

use crate::errors::ApiError;
use crate::routes;

pub type Products = Arc<Collection<Product>>;

/// Fixed seed data the products service boots with.
pub fn seed_collection() -> Products {
    Collection::new(
        "Product",
        vec![
            Product {
                id: 1,
                name: Some("Wireless Mouse".into()),
                category: Some("Electronics".into()),
                price: Some(799.0),
                stock: Some(25),
                rating: Some(4.3),
            },
            Product {
                id: 2,
                name: Some("Running Shoes".into()),
                category: Some("Footwear".into()),
                price: Some(2499.0),
                stock: Some(40),
                rating: Some(4.5),
            },
            Product {
                id: 3,
                name: Some("Laptop Stand".into()),
                category: Some("Accessories".into()),
                price: Some(999.0),
                stock: Some(30),
                rating: Some(4.2),
            },
            Product {
                id: 4,
                name: Some("Smart Watch".into()),
                category: Some("Electronics".into()),
                price: Some(4999.0),
                stock: Some(12),
                rating: Some(4.4),
            },
            Product {
                id: 5,
                name: Some("Backpack".into()),
                category: Some("Fashion".into()),
                price: Some(1599.0),
                stock: Some(50),
                rating: Some(4.1),
            },
        ],
    )
}

/// Create/replace body. No key is required; absent keys stay absent on
/// the stored record and unrecognized keys are dropped.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl ProductInput {
    fn into_product(self, id: u64) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            stock: self.stock,
            rating: self.rating,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StockPatch {
    #[serde(default)]
    pub stock: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PricePatch {
    #[serde(default)]
    pub price: Option<f64>,
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    responses((status = 200, description = "List OK"))
)]
pub async fn list_products(State(col): State<Products>) -> Json<Vec<Product>> {
    Json(col.list().await)
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_product(
    State(col): State<Products>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(col.get(id).await?))
}

/// Category match is case-insensitive; no match is an empty listing,
/// not an error.
#[utoipa::path(
    get, path = "/products/category/{category}", tag = "products",
    params(("category" = String, Path, description = "Category name")),
    responses((status = 200, description = "List OK, possibly empty"))
)]
pub async fn products_by_category(
    State(col): State<Products>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let matched = col
        .filter_text(&category, EmptyMatch::AsEmptyList, |p| p.category.as_deref())
        .await?;
    Ok(Json(matched))
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    responses((status = 201, description = "Created"))
)]
pub async fn create_product(
    State(col): State<Products>,
    Json(input): Json<ProductInput>,
) -> (StatusCode, Json<Product>) {
    let created = col.create(|id| input.into_product(id)).await;
    info!(id = created.id, "created product");
    (StatusCode::CREATED, Json(created))
}

/// Full replacement: every field except the id takes the supplied value,
/// and unsupplied fields are cleared.
#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Replaced"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn replace_product(
    State(col): State<Products>,
    Path(id): Path<u64>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, ApiError> {
    let replaced = col.replace(id, |rid| input.into_product(rid)).await?;
    info!(id, "replaced product");
    Ok(Json(replaced))
}

/// Overwrites only the stock field; an absent `stock` value is a no-op
/// that still answers the record with 200.
#[utoipa::path(
    put, path = "/products/{id}/stock", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_stock(
    State(col): State<Products>,
    Path(id): Path<u64>,
    Json(patch): Json<StockPatch>,
) -> Result<Json<Product>, ApiError> {
    let updated = col
        .update(id, |p| {
            if let Some(stock) = patch.stock {
                p.stock = Some(stock);
            }
        })
        .await?;
    info!(id, stock = ?updated.stock, "updated product stock");
    Ok(Json(updated))
}

/// Overwrites only the price field; an absent `price` value is a no-op.
#[utoipa::path(
    put, path = "/products/{id}/price", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_price(
    State(col): State<Products>,
    Path(id): Path<u64>,
    Json(patch): Json<PricePatch>,
) -> Result<Json<Product>, ApiError> {
    let updated = col
        .update(id, |p| {
            if let Some(price) = patch.price {
                p.price = Some(price);
            }
        })
        .await?;
    info!(id, price = ?updated.price, "updated product price");
    Ok(Json(updated))
}

/// Build the products application router. The original service fronts a
/// browser client, so it keeps a permissive CORS layer.
pub fn router(col: Products, cors: CorsLayer) -> Router {
    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/products", get(list_products).post(create_product))
        .route("/products/:id", get(get_product).put(replace_product))
        .route("/products/category/:category", get(products_by_category))
        .route("/products/:id/stock", put(update_stock))
        .route("/products/:id/price", put(update_price))
        .with_state(col)
        .layer(cors);
    routes::with_trace(app)
}
