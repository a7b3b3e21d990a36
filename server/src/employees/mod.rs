//! `/employees/*` routes: list, search, the add/update form, save and delete.

pub mod forms;
pub mod views;

use axum::{
    Form, Router,
    extract::{
        Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    response::Redirect,
    routing::{get, post},
};
use platform_api::{ApiError, ApiResult};
use platform_db::SaveEmployee;
use tracing::debug;

use self::{
    forms::{EmployeeForm, EmployeeIdQuery, SearchQuery},
    views::{EmployeeDraft, Page, View},
};
use crate::http::{AppState, db_error};

pub const LIST_PATH: &str = "/employees/list";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list_employees))
        .route("/showFormForAdd", get(show_form_for_add))
        .route("/showFormForUpdate", get(show_form_for_update))
        .route("/save", post(save_employee))
        .route("/delete", get(delete_employee))
        .route("/search", get(search_employees))
}

pub(crate) async fn list_employees(State(state): State<AppState>) -> ApiResult<Page> {
    let employees = state.employees.find_all().await.map_err(db_error)?;
    Ok(state.page(View::List {
        employees,
        search: None,
    }))
}

pub(crate) async fn show_form_for_add(State(state): State<AppState>) -> Page {
    state.page(View::Form {
        employee: EmployeeDraft::default(),
    })
}

pub(crate) async fn show_form_for_update(
    State(state): State<AppState>,
    query: Result<Query<EmployeeIdQuery>, QueryRejection>,
) -> ApiResult<Page> {
    let Query(query) = query.map_err(query_error)?;
    let employee = state
        .employees
        .find_by_id(query.employee_id)
        .await
        .map_err(db_error)?;
    Ok(state.page(View::Form {
        employee: employee.into(),
    }))
}

/// Insert or update, then redirect so a browser refresh cannot resubmit.
pub(crate) async fn save_employee(
    State(state): State<AppState>,
    form: Result<Form<EmployeeForm>, FormRejection>,
) -> ApiResult<Redirect> {
    let Form(form) = form.map_err(|rejection| ApiError::invalid(rejection.body_text()))?;
    let request = SaveEmployee::try_from(form)?;
    debug!(?request, "saving employee");
    state.employees.save(request).await.map_err(db_error)?;
    Ok(Redirect::to(LIST_PATH))
}

pub(crate) async fn delete_employee(
    State(state): State<AppState>,
    query: Result<Query<EmployeeIdQuery>, QueryRejection>,
) -> ApiResult<Redirect> {
    let Query(query) = query.map_err(query_error)?;
    state
        .employees
        .delete_by_id(query.employee_id)
        .await
        .map_err(db_error)?;
    Ok(Redirect::to(LIST_PATH))
}

pub(crate) async fn search_employees(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Page> {
    let Query(query) = query.map_err(query_error)?;
    let employees = state
        .employees
        .search_by(&query.employee_name)
        .await
        .map_err(db_error)?;
    Ok(state.page(View::List {
        employees,
        search: Some(query.employee_name),
    }))
}

fn query_error(rejection: QueryRejection) -> ApiError {
    ApiError::invalid(rejection.body_text())
}
