use std::net::SocketAddr;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;

use server::routes::{products, store, students};
use server::startup::build_cors;

struct TestApp {
    base_url: String,
}

async fn start(app: Router) -> anyhow::Result<TestApp> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

async fn start_products() -> anyhow::Result<TestApp> {
    start(products::router(products::seed_collection(), build_cors())).await
}

async fn start_store() -> anyhow::Result<TestApp> {
    start(store::router(store::seed_collection())).await
}

async fn start_students() -> anyhow::Result<TestApp> {
    start(students::router(students::seed_collection())).await
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    for app in [start_products().await?, start_store().await?, start_students().await?] {
        let res = client().get(format!("{}/health", app.base_url)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["status"], "ok");
    }
    Ok(())
}

#[tokio::test]
async fn e2e_products_list_and_get() -> anyhow::Result<()> {
    let app = start_products().await?;
    let c = client();

    let res = c.get(format!("{}/products", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body.as_array().map(|a| a.len()), Some(5));
    assert_eq!(body[0]["id"].as_u64(), Some(1));

    let res = c.get(format!("{}/products/2", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["name"], "Running Shoes");
    assert_eq!(body["price"].as_f64(), Some(2499.0));
    Ok(())
}

#[tokio::test]
async fn e2e_products_unknown_id_is_404_with_message() -> anyhow::Result<()> {
    let app = start_products().await?;
    let res = client().get(format!("{}/products/999", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    let message = body["message"].as_str().expect("message body");
    assert!(message.contains("not found"), "message was: {message}");
    Ok(())
}

#[tokio::test]
async fn e2e_products_category_filter_case_insensitive_and_empty_ok() -> anyhow::Result<()> {
    let app = start_products().await?;
    let c = client();

    let res = c.get(format!("{}/products/category/ELECTRONICS", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body.as_array().map(|a| a.len()), Some(2));

    // no match is an empty array, not an error
    let res = c.get(format!("{}/products/category/toys", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body.as_array().map(|a| a.len()), Some(0));
    Ok(())
}

#[tokio::test]
async fn e2e_products_create_assigns_next_id() -> anyhow::Result<()> {
    let app = start_products().await?;
    let c = client();

    let res = c
        .post(format!("{}/products", app.base_url))
        .json(&json!({"name": "Desk Lamp", "category": "Electronics", "price": 499, "stock": 10, "rating": 4.0}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["id"].as_u64(), Some(6));
    assert_eq!(body["name"], "Desk Lamp");

    let res = c.get(format!("{}/products", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body.as_array().map(|a| a.len()), Some(6));
    Ok(())
}

#[tokio::test]
async fn e2e_products_replace_discards_unsupplied_fields() -> anyhow::Result<()> {
    let app = start_products().await?;
    let c = client();

    let res = c
        .put(format!("{}/products/1", app.base_url))
        .json(&json!({"price": 900}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["id"].as_u64(), Some(1));
    assert_eq!(body["price"].as_f64(), Some(900.0));
    // full replacement: every field not supplied is gone
    assert!(body.get("name").is_none());
    assert!(body.get("stock").is_none());

    // sibling record unaffected
    let res = c.get(format!("{}/products/2", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["price"].as_f64(), Some(2499.0));

    let res = c
        .put(format!("{}/products/999", app.base_url))
        .json(&json!({"price": 1}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_products_stock_patch_touches_only_stock() -> anyhow::Result<()> {
    let app = start_products().await?;
    let c = client();

    let res = c
        .put(format!("{}/products/1/stock", app.base_url))
        .json(&json!({"stock": 99}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["stock"].as_i64(), Some(99));
    assert_eq!(body["name"], "Wireless Mouse");
    assert_eq!(body["price"].as_f64(), Some(799.0));

    // absent value: no-op that still answers 200 with the record
    let res = c
        .put(format!("{}/products/1/stock", app.base_url))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["stock"].as_i64(), Some(99));
    Ok(())
}

#[tokio::test]
async fn e2e_products_price_patch() -> anyhow::Result<()> {
    let app = start_products().await?;
    let res = client()
        .put(format!("{}/products/3/price", app.base_url))
        .json(&json!({"price": 1099}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["price"].as_f64(), Some(1099.0));
    assert_eq!(body["stock"].as_i64(), Some(30));
    Ok(())
}

#[tokio::test]
async fn e2e_store_list_get_and_category() -> anyhow::Result<()> {
    let app = start_store().await?;
    let c = client();

    let res = c.get(format!("{}/all", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body.as_array().map(|a| a.len()), Some(3));

    let res = c.get(format!("{}/product/3", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["title"], "Mens Cotton Jacket");
    assert_eq!(body["rating"]["count"].as_u64(), Some(500));

    let res = c.get(format!("{}/category/MEN'S CLOTHING", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body.as_array().map(|a| a.len()), Some(3));

    let res = c.get(format!("{}/category/jewelery", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body.as_array().map(|a| a.len()), Some(0));
    Ok(())
}

#[tokio::test]
async fn e2e_store_explicit_id_create_allows_duplicates() -> anyhow::Result<()> {
    let app = start_store().await?;
    let c = client();

    let res = c
        .post(format!("{}/product/2", app.base_url))
        .json(&json!({"title": "Knockoff Shirt", "price": 9.99, "category": "men's clothing"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Product added successfully");
    assert_eq!(body["product"]["id"].as_u64(), Some(2));

    let res = c.get(format!("{}/all", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body.as_array().map(|a| a.len()), Some(4));

    // id lookup keeps answering the earlier record
    let res = c.get(format!("{}/product/2", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["title"], "Mens Casual Premium Slim Fit T-Shirts");
    Ok(())
}

#[tokio::test]
async fn e2e_students_branch_filter_404_on_no_match() -> anyhow::Result<()> {
    let app = start_students().await?;
    let c = client();

    let res = c.get(format!("{}/students/branch/cse", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body.as_array().map(|a| a.len()), Some(2));

    // the branch endpoint is the one filter that 404s on zero matches
    let res = c.get(format!("{}/students/branch/CIVIL", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["message"].as_str().is_some());
    Ok(())
}

#[tokio::test]
async fn e2e_students_aggregates() -> anyhow::Result<()> {
    let app = start_students().await?;
    let c = client();

    let res = c.get(format!("{}/students/topper", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["id"].as_u64(), Some(2));
    assert_eq!(body["cgpa"].as_f64(), Some(9.1));

    let res = c.get(format!("{}/students/average", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    let avg = body["averageCgpa"].as_f64().expect("numeric average");
    assert!((avg - 8.06).abs() < 1e-9, "average was: {avg}");

    let res = c.get(format!("{}/students/count", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["totalStudents"].as_u64(), Some(5));
    Ok(())
}

#[tokio::test]
async fn e2e_students_get_and_create() -> anyhow::Result<()> {
    let app = start_students().await?;
    let c = client();

    let res = c.get(format!("{}/students/4", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["name"], "Sneha Iyer");

    let res = c.get(format!("{}/students/999", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["message"].as_str().unwrap_or_default().contains("not found"));

    let res = c
        .post(format!("{}/students", app.base_url))
        .json(&json!({"name": "Meera Nair", "branch": "CSE", "semester": 1, "cgpa": 9.4}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["id"].as_u64(), Some(6));

    let res = c.get(format!("{}/students/6", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["name"], "Meera Nair");
    Ok(())
}
