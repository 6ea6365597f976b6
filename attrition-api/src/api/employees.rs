//! Employee listing and lookup

use attrition_common::{Employee, EmployeeList};
use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::debug;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::pagination::PageQuery;
use crate::AppState;

/// GET /employees?skip=&limit=
///
/// `total` is the full table count, independent of the window.
pub async fn list_employees(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<EmployeeList>> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;
    let page = query.page();

    let total = db::count_employees(&state.db).await?;
    let employees = db::list_employees(&state.db, page).await?;

    debug!(
        offset = page.offset,
        limit = page.limit,
        returned = employees.len(),
        "Listed employees"
    );

    Ok(Json(EmployeeList { total, employees }))
}

/// GET /employees/:id
pub async fn get_employee(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Employee>> {
    let Path(id) = id.map_err(|e| ApiError::Validation(e.body_text()))?;

    db::get_employee(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::employee_not_found(id))
}

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees))
        .route("/employees/:id", get(get_employee))
}
