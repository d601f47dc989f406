//! User directory HTTP handlers.
//!
//! ```text
//! GET /api/v1/users
//! POST /api/v1/users {"name":"Ada","email":"ada@example.com","phone":"13800138000","role":"user"}
//! PUT /api/v1/users/query {"searchKeyword":"zhang","pageSize":10,"currentPage":1}
//! PUT /api/v1/users/editing {"id":2}
//! PUT /api/v1/users/{id} {...form...}
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::PageSize;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{DirectoryView, Error, UserDraft, UserForm, UserId, UserPatch, UserRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{page_size_error, user_form_error};

/// Filter and pager changes for `PUT /api/v1/users/query`.
///
/// Fields apply in declaration order; changing the keyword or page size
/// rewinds to page one before `currentPage` is applied.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryQueryRequest {
    /// New search keyword.
    pub search_keyword: Option<String>,
    /// New page size; must be positive.
    pub page_size: Option<usize>,
    /// One-based page to show, not bounds checked.
    pub current_page: Option<usize>,
}

/// Selection for `PUT /api/v1/users/editing`; `null` closes the form.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EditingRequest {
    /// Record to open, or `None` to close the form.
    pub id: Option<i64>,
}

fn parse_form(form: UserForm) -> Result<UserDraft, Error> {
    UserDraft::try_from(form).map_err(|errors| user_form_error(&errors))
}

fn missing_user(id: UserId) -> Error {
    Error::not_found(format!("user {id} does not exist"))
}

/// Current page of the directory plus pager metadata.
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DirectoryView>> {
    session.require_authenticated()?;
    let view = state.store()?.directory().view();
    Ok(web::Json(view))
}

/// Validate the form and append a new record.
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UserForm>,
) -> ApiResult<HttpResponse> {
    session.require_authenticated()?;
    let draft = parse_form(payload.into_inner())?;
    let record = state.store()?.directory_mut().add(draft);
    info!(id = %record.id(), "user created");
    Ok(HttpResponse::Created().json(record))
}

/// Change search keyword, page size or current page.
#[put("/users/query")]
pub async fn update_query(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DirectoryQueryRequest>,
) -> ApiResult<web::Json<DirectoryView>> {
    session.require_authenticated()?;
    let DirectoryQueryRequest {
        search_keyword,
        page_size: raw_page_size,
        current_page,
    } = payload.into_inner();
    let page_size = raw_page_size
        .map(PageSize::new)
        .transpose()
        .map_err(|err| page_size_error(&err))?;

    let mut store = state.store()?;
    let directory = store.directory_mut();
    if let Some(keyword) = search_keyword {
        directory.set_search_keyword(keyword);
    }
    if let Some(size) = page_size {
        directory.set_page_size(size);
    }
    if let Some(page) = current_page {
        directory.set_current_page(page);
    }
    Ok(web::Json(directory.view()))
}

/// Open a record in the edit form, or close the form.
#[put("/users/editing")]
pub async fn set_editing(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<EditingRequest>,
) -> ApiResult<web::Json<DirectoryView>> {
    session.require_authenticated()?;
    let mut store = state.store()?;
    let directory = store.directory_mut();
    match payload.into_inner().id.map(UserId::new) {
        Some(id) => {
            let record = directory.find(id).cloned().ok_or_else(|| missing_user(id))?;
            directory.set_editing_record(Some(record));
        }
        None => directory.clear_editing_record(),
    }
    Ok(web::Json(directory.view()))
}

/// Validate the form and overwrite the record's fields.
///
/// The edit form is closed afterwards.
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<UserForm>,
) -> ApiResult<web::Json<UserRecord>> {
    session.require_authenticated()?;
    let id = UserId::new(path.into_inner());
    let patch = UserPatch::from(parse_form(payload.into_inner())?);

    let mut store = state.store()?;
    let directory = store.directory_mut();
    let record = directory
        .update(id, patch)
        .cloned()
        .ok_or_else(|| missing_user(id))?;
    directory.clear_editing_record();
    info!(%id, "user updated");
    Ok(web::Json(record))
}

/// Remove the record; unknown ids are a no-op.
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    session.require_authenticated()?;
    let id = UserId::new(path.into_inner());
    let removed = state.store()?.directory_mut().delete_visible(id);
    info!(%id, removed, "user delete requested");
    Ok(HttpResponse::NoContent().finish())
}
