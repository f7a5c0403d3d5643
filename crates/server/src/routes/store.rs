use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use models::{Rating, StoreItem};
use service::collection::{Collection, EmptyMatch};

use crate::errors::ApiError;
use crate::routes;

pub type StoreItems = Arc<Collection<StoreItem>>;

/// 启动种子数据：与上线时的固定商品列表一致
pub fn seed_collection() -> StoreItems {
    Collection::new(
        "Product",
        vec![
            StoreItem {
                id: 1,
                title: Some("Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops".into()),
                price: Some(109.95),
                category: Some("men's clothing".into()),
                image: Some("https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_t.png".into()),
                rating: Some(Rating { rate: Some(3.9), count: Some(120) }),
            },
            StoreItem {
                id: 2,
                title: Some("Mens Casual Premium Slim Fit T-Shirts".into()),
                price: Some(22.3),
                category: Some("men's clothing".into()),
                image: Some(
                    "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_t.png".into(),
                ),
                rating: Some(Rating { rate: Some(4.1), count: Some(259) }),
            },
            StoreItem {
                id: 3,
                title: Some("Mens Cotton Jacket".into()),
                price: Some(55.99),
                category: Some("men's clothing".into()),
                image: Some("https://fakestoreapi.com/img/71li-ujtlUL._AC_UX679_t.png".into()),
                rating: Some(Rating { rate: Some(4.7), count: Some(500) }),
            },
        ],
    )
}

/// 创建输入：所有键可省略，省略的键在存储记录上保持缺失
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StoreItemInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<Rating>,
}

impl StoreItemInput {
    fn into_item(self, id: u64) -> StoreItem {
        StoreItem {
            id,
            title: self.title,
            price: self.price,
            category: self.category,
            image: self.image,
            rating: self.rating,
        }
    }
}

/// 列出全部商品
#[utoipa::path(
    get, path = "/all", tag = "store",
    responses((status = 200, description = "List OK"))
)]
pub async fn list_items(State(col): State<StoreItems>) -> Json<Vec<StoreItem>> {
    Json(col.list().await)
}

/// 根据 id 获取商品
#[utoipa::path(
    get, path = "/product/{id}", tag = "store",
    params(("id" = u64, Path, description = "Item id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_item(
    State(col): State<StoreItems>,
    Path(id): Path<u64>,
) -> Result<Json<StoreItem>, ApiError> {
    Ok(Json(col.get(id).await?))
}

/// 新增商品：id 由调用方指定并原样使用，不做唯一性校验
#[utoipa::path(
    post, path = "/product/{id}", tag = "store",
    params(("id" = u64, Path, description = "Caller-assigned item id")),
    responses((status = 201, description = "Created"))
)]
pub async fn add_item(
    State(col): State<StoreItems>,
    Path(id): Path<u64>,
    Json(input): Json<StoreItemInput>,
) -> (StatusCode, Json<serde_json::Value>) {
    let created = col.push(input.into_item(id)).await;
    info!(id = created.id, "added store item");
    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Product added successfully",
            "product": created,
        })),
    )
}

/// 按分类筛选：无匹配时返回空列表
#[utoipa::path(
    get, path = "/category/{category}", tag = "store",
    params(("category" = String, Path, description = "Category name")),
    responses((status = 200, description = "List OK, possibly empty"))
)]
pub async fn items_by_category(
    State(col): State<StoreItems>,
    Path(category): Path<String>,
) -> Result<Json<Vec<StoreItem>>, ApiError> {
    let matched = col
        .filter_text(&category, EmptyMatch::AsEmptyList, |i| i.category.as_deref())
        .await?;
    Ok(Json(matched))
}

pub fn router(col: StoreItems) -> Router {
    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/all", get(list_items))
        .route("/product/:id", get(get_item).post(add_item))
        .route("/category/:category", get(items_by_category))
        .with_state(col);
    routes::with_trace(app)
}
