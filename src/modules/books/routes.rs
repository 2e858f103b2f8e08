use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use folio_http::error::AppError;
use serde::Deserialize;

use super::models::{Book, BookId, BookInput, BookUpdateInput, BookWithAuthor};
use super::service::BookService;
use crate::modules::authors::models::AuthorId;
use crate::utils;

type ApiResult<T> = Result<Json<T>, AppError>;

#[derive(Debug, Deserialize)]
struct TitleQuery {
    title: String,
}

#[derive(Debug, Deserialize)]
struct KeywordQuery {
    keyword: String,
}

#[derive(Debug, Deserialize)]
struct PriceRangeQuery {
    min: f64,
    max: f64,
}

#[derive(Debug, Deserialize)]
struct AuthorNameQuery {
    name: String,
}

#[derive(Debug, Deserialize)]
struct NationalityQuery {
    nationality: String,
}

/// HTTP routes for the books module, relative to its mount point.
pub fn router(service: BookService) -> Router {
    let prefix = utils::log_prefix("books");
    tracing::debug!(target: "folio.routes", %prefix, "registering book routes");

    Router::new()
        .route("/", get(get_all_books).post(create_book))
        .route("/by-title", get(get_books_by_title))
        .route("/search", get(search_books))
        .route("/by-author/{author_id}", get(get_books_by_author_id))
        .route("/by-price", get(get_books_by_price_range))
        .route("/with-author", get(get_books_with_authors))
        .route("/by-author-name", get(get_books_by_author_name))
        .route("/by-author-nationality", get(get_books_by_author_nationality))
        .route(
            "/{id}",
            get(get_book_by_id).patch(update_book).delete(delete_book),
        )
        .route("/{id}/with-author", get(get_book_with_author))
        .with_state(service)
}

async fn get_all_books(State(service): State<BookService>) -> ApiResult<Vec<Book>> {
    Ok(Json(service.get_all().await?))
}

async fn get_book_by_id(
    State(service): State<BookService>,
    Path(id): Path<BookId>,
) -> ApiResult<Option<Book>> {
    Ok(Json(service.get_by_id(id).await?))
}

async fn get_books_by_title(
    State(service): State<BookService>,
    Query(query): Query<TitleQuery>,
) -> ApiResult<Vec<Book>> {
    Ok(Json(service.get_by_title_substring(&query.title).await?))
}

async fn search_books(
    State(service): State<BookService>,
    Query(query): Query<KeywordQuery>,
) -> ApiResult<Vec<Book>> {
    Ok(Json(service.search_by_keyword(&query.keyword).await?))
}

async fn get_books_by_author_id(
    State(service): State<BookService>,
    Path(author_id): Path<AuthorId>,
) -> ApiResult<Vec<Book>> {
    Ok(Json(service.get_by_author_id(author_id).await?))
}

async fn get_books_by_price_range(
    State(service): State<BookService>,
    Query(range): Query<PriceRangeQuery>,
) -> ApiResult<Vec<Book>> {
    Ok(Json(service.get_by_price_range(range.min, range.max).await?))
}

async fn get_book_with_author(
    State(service): State<BookService>,
    Path(id): Path<BookId>,
) -> ApiResult<Option<BookWithAuthor>> {
    Ok(Json(service.get_with_author(id).await?))
}

async fn get_books_with_authors(
    State(service): State<BookService>,
) -> ApiResult<Vec<BookWithAuthor>> {
    Ok(Json(service.get_all_with_author().await?))
}

async fn get_books_by_author_name(
    State(service): State<BookService>,
    Query(query): Query<AuthorNameQuery>,
) -> ApiResult<Vec<Book>> {
    Ok(Json(service.get_by_author_name(&query.name).await?))
}

async fn get_books_by_author_nationality(
    State(service): State<BookService>,
    Query(query): Query<NationalityQuery>,
) -> ApiResult<Vec<Book>> {
    Ok(Json(
        service
            .get_by_author_nationality(&query.nationality)
            .await?,
    ))
}

async fn create_book(
    State(service): State<BookService>,
    Json(input): Json<BookInput>,
) -> ApiResult<BookWithAuthor> {
    Ok(Json(service.create(input).await?))
}

async fn update_book(
    State(service): State<BookService>,
    Path(id): Path<BookId>,
    Json(delta): Json<BookUpdateInput>,
) -> ApiResult<BookWithAuthor> {
    Ok(Json(service.update(id, delta).await?))
}

async fn delete_book(
    State(service): State<BookService>,
    Path(id): Path<BookId>,
) -> ApiResult<bool> {
    Ok(Json(service.delete(id).await?))
}
