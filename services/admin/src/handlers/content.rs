//! Generic CRUD handlers shared by `/api/events`, `/api/announcements` and `/api/members`.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_typed_multipart::{TryFromMultipartWithState, TypedMultipart, TypedMultipartError};

use corporate_domain::auth::MessageResponse;
use corporate_domain::id::ContentId;
use corporate_domain::pagination::{DataResponse, ListResponse, PageRequest};

use crate::domain::content::ContentKind;
use crate::domain::repository::ContentRepository;
use crate::error::AdminServiceError;
use crate::extract::CurrentAdmin;
use crate::handlers::{form_body, path_id, query_params};
use crate::infra::storage::DiskFileStore;
use crate::state::AppState;
use crate::usecase::content::{ContentInput, ContentUseCase};

/// HTTP binding of a content resource: its multipart form and its repository.
pub trait ContentRoute: ContentKind {
    type Form: TryFromMultipartWithState<AppState> + Send + 'static;
    type Repo: ContentRepository<Self> + 'static;

    fn repo(state: &AppState) -> Self::Repo;

    /// Split a form into the text fields, the photo and the `_method` override.
    fn split(form: Self::Form) -> (ContentInput<Self>, Option<String>);
}

fn usecase<R: ContentRoute>(state: &AppState) -> ContentUseCase<R, R::Repo, DiskFileStore> {
    ContentUseCase::new(R::repo(state), state.files.clone(), state.urls.clone())
}

/// Routes for one resource, relative to `/api`.
pub fn routes<R: ContentRoute>() -> Router<AppState> {
    Router::new()
        .route(&format!("/{}", R::PATH), get(list::<R>).post(create::<R>))
        .route(
            &format!("/{}/{{id}}", R::PATH),
            get(show::<R>)
                .put(update::<R>)
                .patch(update::<R>)
                .delete(destroy::<R>)
                .post(method_override::<R>),
        )
}

pub async fn list<R: ContentRoute>(
    State(state): State<AppState>,
    page: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<ListResponse<R>>, AdminServiceError> {
    let (records, page) = usecase::<R>(&state).list(query_params(page)?).await?;
    Ok(Json(ListResponse::new(records, page)))
}

pub async fn show<R: ContentRoute>(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DataResponse<R>>, AdminServiceError> {
    let id = path_id(id, R::NAME)?;
    let record = usecase::<R>(&state).get(ContentId(id)).await?;
    Ok(Json(DataResponse::new(record)))
}

pub async fn create<R: ContentRoute>(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    form: Result<TypedMultipart<R::Form>, TypedMultipartError>,
) -> Result<impl IntoResponse, AdminServiceError> {
    let (input, _) = R::split(form_body(form)?);
    let record = usecase::<R>(&state).create(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(record))))
}

pub async fn update<R: ContentRoute>(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    id: Result<Path<i64>, PathRejection>,
    form: Result<TypedMultipart<R::Form>, TypedMultipartError>,
) -> Result<Json<DataResponse<R>>, AdminServiceError> {
    let id = path_id(id, R::NAME)?;
    let (input, _) = R::split(form_body(form)?);
    let record = usecase::<R>(&state).update(ContentId(id), input).await?;
    Ok(Json(DataResponse::new(record)))
}

pub async fn destroy<R: ContentRoute>(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AdminServiceError> {
    let id = path_id(id, R::NAME)?;
    usecase::<R>(&state).delete(ContentId(id)).await?;
    Ok(Json(MessageResponse::success(format!("{} deleted", R::NAME))))
}

/// `POST /{resource}/{id}` with `_method` = `PUT`, `PATCH` or `DELETE` in the form body.
pub async fn method_override<R: ContentRoute>(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
    id: Result<Path<i64>, PathRejection>,
    form: Result<TypedMultipart<R::Form>, TypedMultipartError>,
) -> Result<Response, AdminServiceError> {
    let id = path_id(id, R::NAME)?;
    let (input, method) = R::split(form_body(form)?);
    let uc = usecase::<R>(&state);
    match method.as_deref().map(str::to_ascii_uppercase).as_deref() {
        Some("PUT") | Some("PATCH") => {
            let record = uc.update(ContentId(id), input).await?;
            Ok(Json(DataResponse::new(record)).into_response())
        }
        Some("DELETE") => {
            uc.delete(ContentId(id)).await?;
            Ok(Json(MessageResponse::success(format!("{} deleted", R::NAME))).into_response())
        }
        _ => Err(AdminServiceError::MethodNotAllowed),
    }
}
