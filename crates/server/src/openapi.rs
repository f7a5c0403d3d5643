use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct ProductDoc {
    pub id: u64,
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub rating: Option<f64>,
}

#[derive(ToSchema)]
pub struct RatingDoc {
    pub rate: Option<f64>,
    pub count: Option<u64>,
}

#[derive(ToSchema)]
pub struct StoreItemDoc {
    pub id: u64,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub rating: Option<RatingDoc>,
}

#[derive(ToSchema)]
pub struct StudentDoc {
    pub id: u64,
    pub name: Option<String>,
    pub branch: Option<String>,
    pub semester: Option<i32>,
    pub cgpa: Option<f64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::list_products,
        crate::routes::products::get_product,
        crate::routes::products::products_by_category,
        crate::routes::products::create_product,
        crate::routes::products::replace_product,
        crate::routes::products::update_stock,
        crate::routes::products::update_price,
        crate::routes::store::list_items,
        crate::routes::store::get_item,
        crate::routes::store::add_item,
        crate::routes::store::items_by_category,
        crate::routes::students::list_students,
        crate::routes::students::get_student,
        crate::routes::students::students_by_branch,
        crate::routes::students::topper,
        crate::routes::students::average_cgpa,
        crate::routes::students::count_students,
        crate::routes::students::create_student,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDoc,
            RatingDoc,
            StoreItemDoc,
            StudentDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products"),
        (name = "store"),
        (name = "students")
    )
)]
pub struct ApiDoc;
