use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use models::Student;
use service::collection::{Collection, EmptyMatch};

use crate::errors::ApiError;
use crate::routes;

pub type Students = Arc<Collection<Student>>;

pub fn seed_collection() -> Students {
    Collection::new(
        "Student",
        vec![
            Student {
                id: 1,
                name: Some("Aarav Sharma".into()),
                branch: Some("CSE".into()),
                semester: Some(5),
                cgpa: Some(8.7),
            },
            Student {
                id: 2,
                name: Some("Diya Patel".into()),
                branch: Some("ECE".into()),
                semester: Some(3),
                cgpa: Some(9.1),
            },
            Student {
                id: 3,
                name: Some("Rohan Gupta".into()),
                branch: Some("CSE".into()),
                semester: Some(5),
                cgpa: Some(7.4),
            },
            Student {
                id: 4,
                name: Some("Sneha Iyer".into()),
                branch: Some("ME".into()),
                semester: Some(7),
                cgpa: Some(8.2),
            },
            Student {
                id: 5,
                name: Some("Kabir Khan".into()),
                branch: Some("ECE".into()),
                semester: Some(3),
                cgpa: Some(6.9),
            },
        ],
    )
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StudentInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub semester: Option<i32>,
    #[serde(default)]
    pub cgpa: Option<f64>,
}

impl StudentInput {
    fn into_student(self, id: u64) -> Student {
        Student {
            id,
            name: self.name,
            branch: self.branch,
            semester: self.semester,
            cgpa: self.cgpa,
        }
    }
}

#[utoipa::path(
    get, path = "/students", tag = "students",
    responses((status = 200, description = "List OK"))
)]
pub async fn list_students(State(col): State<Students>) -> Json<Vec<Student>> {
    Json(col.list().await)
}

#[utoipa::path(
    get, path = "/students/{id}", tag = "students",
    params(("id" = u64, Path, description = "Student id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_student(
    State(col): State<Students>,
    Path(id): Path<u64>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(col.get(id).await?))
}

/// Unlike the category filters, zero matches here answer 404.
#[utoipa::path(
    get, path = "/students/branch/{branch}", tag = "students",
    params(("branch" = String, Path, description = "Branch name")),
    responses(
        (status = 200, description = "List OK"),
        (status = 404, description = "No student matched")
    )
)]
pub async fn students_by_branch(
    State(col): State<Students>,
    Path(branch): Path<String>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let matched = col
        .filter_text(&branch, EmptyMatch::AsNotFound, |s| s.branch.as_deref())
        .await?;
    Ok(Json(matched))
}

#[utoipa::path(
    get, path = "/students/topper", tag = "students",
    responses(
        (status = 200, description = "Student with the highest cgpa"),
        (status = 404, description = "Empty collection")
    )
)]
pub async fn topper(State(col): State<Students>) -> Result<Json<Student>, ApiError> {
    let top = col.max_by(|s| s.cgpa.unwrap_or(f64::MIN)).await?;
    Ok(Json(top))
}

#[utoipa::path(
    get, path = "/students/average", tag = "students",
    responses((status = 200, description = "Average cgpa, 0 when empty"))
)]
pub async fn average_cgpa(State(col): State<Students>) -> Json<serde_json::Value> {
    let avg = col.average(|s| s.cgpa.unwrap_or(0.0)).await;
    Json(serde_json::json!({ "averageCgpa": avg }))
}

#[utoipa::path(
    get, path = "/students/count", tag = "students",
    responses((status = 200, description = "Current number of students"))
)]
pub async fn count_students(State(col): State<Students>) -> Json<serde_json::Value> {
    let total = col.count().await;
    Json(serde_json::json!({ "totalStudents": total }))
}

#[utoipa::path(
    post, path = "/students", tag = "students",
    responses((status = 201, description = "Created"))
)]
pub async fn create_student(
    State(col): State<Students>,
    Json(input): Json<StudentInput>,
) -> (StatusCode, Json<Student>) {
    let created = col.create(|id| input.into_student(id)).await;
    info!(id = created.id, "created student");
    (StatusCode::CREATED, Json(created))
}

pub fn router(col: Students) -> Router {
    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/students", get(list_students).post(create_student))
        .route("/students/topper", get(topper))
        .route("/students/average", get(average_cgpa))
        .route("/students/count", get(count_students))
        .route("/students/:id", get(get_student))
        .route("/students/branch/:branch", get(students_by_branch))
        .with_state(col);
    routes::with_trace(app)
}
