use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use folio_http::error::AppError;
use serde::Deserialize;

use super::models::{Author, AuthorId, AuthorInput, AuthorUpdateInput, AuthorWithBooks};
use super::service::AuthorService;
use crate::utils;

type ApiResult<T> = Result<Json<T>, AppError>;

#[derive(Debug, Deserialize)]
struct EmailQuery {
    email: String,
}

#[derive(Debug, Deserialize)]
struct NameQuery {
    name: String,
}

#[derive(Debug, Deserialize)]
struct NationalityQuery {
    nationality: String,
}

/// HTTP routes for the authors module, relative to its mount point.
pub fn router(service: AuthorService) -> Router {
    let prefix = utils::log_prefix("authors");
    tracing::debug!(target: "folio.routes", %prefix, "registering author routes");

    Router::new()
        .route("/", get(get_all_authors).post(create_author))
        .route("/by-email", get(get_author_by_email))
        .route("/by-name", get(get_authors_by_name))
        .route("/by-nationality", get(get_authors_by_nationality))
        .route("/with-books", get(get_authors_with_books))
        .route(
            "/{id}",
            get(get_author_by_id)
                .patch(update_author)
                .delete(delete_author),
        )
        .route("/{id}/with-books", get(get_author_with_books))
        .with_state(service)
}

async fn get_all_authors(State(service): State<AuthorService>) -> ApiResult<Vec<Author>> {
    Ok(Json(service.get_all().await?))
}

async fn get_author_by_id(
    State(service): State<AuthorService>,
    Path(id): Path<AuthorId>,
) -> ApiResult<Option<Author>> {
    Ok(Json(service.get_by_id(id).await?))
}

async fn get_author_by_email(
    State(service): State<AuthorService>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Option<Author>> {
    Ok(Json(service.get_by_email(&query.email).await?))
}

async fn get_authors_by_name(
    State(service): State<AuthorService>,
    Query(query): Query<NameQuery>,
) -> ApiResult<Vec<Author>> {
    Ok(Json(service.get_by_name_substring(&query.name).await?))
}

async fn get_authors_by_nationality(
    State(service): State<AuthorService>,
    Query(query): Query<NationalityQuery>,
) -> ApiResult<Vec<Author>> {
    Ok(Json(service.get_by_nationality(&query.nationality).await?))
}

async fn get_author_with_books(
    State(service): State<AuthorService>,
    Path(id): Path<AuthorId>,
) -> ApiResult<Option<AuthorWithBooks>> {
    Ok(Json(service.get_with_books(id).await?))
}

async fn get_authors_with_books(
    State(service): State<AuthorService>,
) -> ApiResult<Vec<AuthorWithBooks>> {
    Ok(Json(service.get_all_with_books().await?))
}

async fn create_author(
    State(service): State<AuthorService>,
    Json(input): Json<AuthorInput>,
) -> ApiResult<Author> {
    Ok(Json(service.create(input).await?))
}

async fn update_author(
    State(service): State<AuthorService>,
    Path(id): Path<AuthorId>,
    Json(delta): Json<AuthorUpdateInput>,
) -> ApiResult<Author> {
    Ok(Json(service.update(id, delta).await?))
}

async fn delete_author(
    State(service): State<AuthorService>,
    Path(id): Path<AuthorId>,
) -> ApiResult<bool> {
    Ok(Json(service.delete(id).await?))
}
