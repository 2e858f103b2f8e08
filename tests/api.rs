use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use folio_kernel::Settings;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let settings = Settings::default();
    let registry = folio_app::build_registry(&settings).unwrap();
    folio_http::build_router(&registry, &settings)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_jane(app: &Router) -> i64 {
    let (status, author) = call(
        app,
        Method::POST,
        "/api/authors",
        Some(json!({
            "name": "Jane Doe",
            "email": "jane@x.com",
            "birthDate": "1970-01-02T03:04:05",
            "nationality": "British"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    author["id"].as_i64().unwrap()
}

#[tokio::test]
async fn go_deep_scenario() {
    let app = app();
    let jane = create_jane(&app).await;

    let (status, created) = call(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Go Deep", "authorId": jane })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["author"]["id"], jane);
    let book_id = created["id"].as_i64().unwrap();

    let (_, by_author) = call(&app, Method::GET, &format!("/api/books/by-author/{jane}"), None).await;
    let titles: Vec<&str> = by_author
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Go Deep"]);

    let (_, with_author) = call(
        &app,
        Method::GET,
        &format!("/api/books/{book_id}/with-author"),
        None,
    )
    .await;
    assert_eq!(with_author["author"]["email"], "jane@x.com");

    let (_, author) = call(&app, Method::GET, &format!("/api/authors/{jane}/with-books"), None).await;
    assert_eq!(author["birthDate"], "1970-01-02T03:04:05");
    assert_eq!(author["books"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn patch_applies_only_supplied_fields() {
    let app = app();
    let jane = create_jane(&app).await;
    let (_, created) = call(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "X", "price": 19.99, "authorId": jane })),
    )
    .await;
    let book_id = created["id"].as_i64().unwrap();

    let (status, updated) = call(
        &app,
        Method::PATCH,
        &format!("/api/books/{book_id}"),
        Some(json!({ "price": 9.99, "title": null })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 9.99);
    assert_eq!(updated["title"], "X");
}

#[tokio::test]
async fn error_envelopes() {
    let app = app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Orphan" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["message"], "Author ID is required");
    assert_eq!(body["error"]["details"][0]["field"], "authorId");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Orphan", "authorId": 41 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["message"], "Author not found with id: 41");

    let (status, body) = call(
        &app,
        Method::PATCH,
        "/api/authors/12",
        Some(json!({ "name": "Nobody" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "Author not found with id: 12");

    let jane = create_jane(&app).await;
    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/api/authors/{jane}"),
        Some(json!({ "birthDate": "1970-01-02" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"]["message"],
        "Invalid date format. Please use ISO format (yyyy-MM-ddTHH:mm:ss)"
    );

    let (_, books) = call(&app, Method::GET, "/api/books", None).await;
    assert_eq!(books, json!([]));
}

#[tokio::test]
async fn omitted_required_fields_use_the_error_envelope() {
    let app = app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/authors",
        Some(json!({ "email": "nameless@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"][0]["field"], "name");

    let (blank_status, blank) = call(
        &app,
        Method::POST,
        "/api/authors",
        Some(json!({ "name": "", "email": "nameless@x.com" })),
    )
    .await;
    assert_eq!(blank_status, status);
    assert_eq!(blank["error"]["message"], body["error"]["message"]);

    let jane = create_jane(&app).await;
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "authorId": jane })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"][0]["field"], "title");

    let (_, books) = call(&app, Method::GET, "/api/books", None).await;
    assert_eq!(books, json!([]));
}

#[tokio::test]
async fn missing_entities_serialize_as_null() {
    let app = app();

    let (status, body) = call(&app, Method::GET, "/api/authors/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (_, body) = call(&app, Method::GET, "/api/authors/by-email?email=none%40x.com", None).await;
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn delete_is_true_once_then_false() {
    let app = app();
    let jane = create_jane(&app).await;
    let uri = format!("/api/authors/{jane}");

    let (_, first) = call(&app, Method::DELETE, &uri, None).await;
    let (_, second) = call(&app, Method::DELETE, &uri, None).await;

    assert_eq!(first, json!(true));
    assert_eq!(second, json!(false));
}

#[tokio::test]
async fn query_routes_bind_parameters() {
    let app = app();
    let jane = create_jane(&app).await;
    for (title, price) in [("Cheap", 5.0), ("Mid", 15.0), ("Dear", 50.0)] {
        call(
            &app,
            Method::POST,
            "/api/books",
            Some(json!({ "title": title, "price": price, "authorId": jane })),
        )
        .await;
    }

    let (_, in_range) = call(&app, Method::GET, "/api/books/by-price?min=5&max=15", None).await;
    assert_eq!(in_range.as_array().unwrap().len(), 2);

    let (_, by_name) = call(&app, Method::GET, "/api/books/by-author-name?name=Jane%20Doe", None).await;
    assert_eq!(by_name.as_array().unwrap().len(), 3);

    let (_, authors) = call(&app, Method::GET, "/api/authors/by-nationality?nationality=British", None).await;
    assert_eq!(authors.as_array().unwrap().len(), 1);

    let (_, with_books) = call(&app, Method::GET, "/api/authors/with-books", None).await;
    assert_eq!(with_books.as_array().unwrap().len(), 1);
    assert_eq!(with_books[0]["books"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn health_and_docs_are_served() {
    let app = app();

    let response = app
        .clone()
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, document) = call(&app, Method::GET, "/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(document["paths"]["/api/books/by-price"]["get"].is_object());
}
