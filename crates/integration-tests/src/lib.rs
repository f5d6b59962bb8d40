//! End-to-end tests for the Tienda storefront client.
//!
//! [`FakeBackend`] serves the storefront REST API from memory on an ephemeral
//! port, records every request it receives, and can be told to answer every
//! request with a fixed error status. Tests point a real
//! [`ApiClient`] at it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tienda-integration-tests
//! ```

use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tienda_core::Credentials;
use tienda_storefront::api::ApiClient;
use tienda_storefront::config::ClientConfig;
use tienda_storefront::storage::SessionStore;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Username the fake backend accepts.
pub const VALID_USERNAME: &str = "pao";
/// Password the fake backend accepts.
pub const VALID_PASSWORD: &str = "secreto";
/// Token issued on a successful login.
pub const VALID_TOKEN: &str = "tok-123";
/// ID of the user behind [`VALID_USERNAME`].
pub const VALID_USER_ID: i64 = 3;

/// Credentials the fake backend accepts.
#[must_use]
pub fn valid_credentials() -> Credentials {
    Credentials::new(VALID_USERNAME, VALID_PASSWORD)
}

/// A request as seen by the fake backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Raw (percent-encoded) path, including the `/api` prefix.
    pub path: String,
    pub authorization: Option<String>,
    /// JSON body, if the request had one.
    pub body: Option<Value>,
}

#[derive(Default)]
struct Backend {
    products: Mutex<Vec<Value>>,
    comments: Mutex<Vec<Value>>,
    cart: Mutex<Vec<Value>>,
    requests: Mutex<Vec<RecordedRequest>>,
    forced_status: Mutex<Option<StatusCode>>,
    next_id: AtomicI64,
}

impl Backend {
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The storefront REST API, served from memory.
pub struct FakeBackend {
    addr: SocketAddr,
    backend: Arc<Backend>,
    server: JoinHandle<()>,
}

impl FakeBackend {
    /// Start a backend on `127.0.0.1` seeded with [`seed_products`].
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let backend = Arc::new(Backend {
            products: Mutex::new(seed_products()),
            next_id: AtomicI64::new(100),
            ..Backend::default()
        });

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router(Arc::clone(&backend));
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            backend,
            server,
        })
    }

    /// API root, e.g. `http://127.0.0.1:41234/api`.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Client configuration pointing at this backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the API root is not a valid URL.
    pub fn config(&self) -> Result<ClientConfig, url::ParseError> {
        Ok(ClientConfig::new(self.api_url().parse()?))
    }

    /// A client for this backend with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn client(
        &self,
        store: Arc<dyn SessionStore>,
    ) -> Result<ApiClient, Box<dyn std::error::Error>> {
        let config = self.config()?;
        Ok(ApiClient::builder(&config, store).build()?)
    }

    /// Answer every request with `status` (or behave normally on `None`).
    pub fn fail_with(&self, status: Option<StatusCode>) {
        *lock(&self.backend.forced_status) = status;
    }

    /// Replace the catalog.
    pub fn set_products(&self, products: Vec<Value>) {
        *lock(&self.backend.products) = products;
    }

    /// Store a comment as if another user had posted it.
    pub fn seed_comment(&self, comment: Value) {
        lock(&self.backend.comments).push(comment);
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.backend.requests).clone()
    }

    /// Requests received for `path` (without the `/api` prefix).
    #[must_use]
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        let full = format!("/api{path}");
        self.requests()
            .into_iter()
            .filter(|request| request.method == method && request.path == full)
            .collect()
    }

    /// Current server-side cart lines.
    #[must_use]
    pub fn cart(&self) -> Vec<Value> {
        lock(&self.backend.cart).clone()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Catalog every backend starts with. Product 2 is out of stock; product 3
/// uses the legacy `imagen` field.
#[must_use]
pub fn seed_products() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "nombre": "One Piece Volumen 1",
            "precio": 120,
            "categoria": "Manga",
            "stock": 8,
            "descripcion": "El inicio del viaje de Luffy",
            "imagen_url": "https://example.com/one-piece-1.jpg"
        }),
        json!({
            "id": 2,
            "nombre": "Batman: Year One",
            "precio": 200.5,
            "categoria": "Comic",
            "stock": 0
        }),
        json!({
            "id": 3,
            "nombre": "Naruto Volumen 10",
            "precio": 95,
            "categoria": "Manga",
            "stock": 30,
            "imagen": "https://example.com/naruto-10.jpg"
        }),
    ]
}

fn router(backend: Arc<Backend>) -> Router {
    Router::new()
        .route("/api/productos", get(list_products).post(create_product))
        .route(
            "/api/productos/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/api/productos/categoria/{categoria}", get(products_by_category))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route(
            "/api/carrito",
            get(get_cart).post(add_to_cart).delete(clear_cart),
        )
        .route(
            "/api/carrito/{id}",
            put(update_cart_item).delete(remove_cart_item),
        )
        .route("/api/comentarios", post(create_comment))
        .route("/api/comentarios/producto/{id}", get(list_comments))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&backend),
            record_request,
        ))
        .with_state(backend)
}

/// Record the request, then either short-circuit with the forced status or
/// pass it on unchanged.
async fn record_request(
    State(backend): State<Arc<Backend>>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let Ok(bytes) = axum::body::to_bytes(body, usize::MAX).await else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let authorization = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    lock(&backend.requests).push(RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        authorization,
        body: serde_json::from_slice(&bytes).ok(),
    });

    let forced = *lock(&backend.forced_status);
    if let Some(status) = forced {
        return (status, "boom").into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn is_authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {VALID_TOKEN}");
    headers
        .get(AUTHORIZATION)
        .is_some_and(|value| value.as_bytes() == expected.as_bytes())
}

fn with_id(mut body: Value, id: i64) -> Result<Value, StatusCode> {
    let object = body.as_object_mut().ok_or(StatusCode::BAD_REQUEST)?;
    object.insert("id".to_string(), json!(id));
    Ok(body)
}

// =============================================================================
// Products
// =============================================================================

async fn list_products(State(backend): State<Arc<Backend>>) -> Json<Value> {
    Json(Value::Array(lock(&backend.products).clone()))
}

async fn products_by_category(
    State(backend): State<Arc<Backend>>,
    Path(categoria): Path<String>,
) -> Json<Value> {
    let matching = lock(&backend.products)
        .iter()
        .filter(|product| product["categoria"] == categoria.as_str())
        .cloned()
        .collect();
    Json(Value::Array(matching))
}

async fn get_product(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    lock(&backend.products)
        .iter()
        .find(|product| product["id"] == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_product(
    State(backend): State<Arc<Backend>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let product = with_id(body, backend.next_id())?;
    lock(&backend.products).push(product.clone());
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let updated = with_id(body, id)?;
    let mut products = lock(&backend.products);
    let slot = products
        .iter_mut()
        .find(|product| product["id"] == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    slot.clone_from(&updated);
    Ok(Json(updated))
}

async fn delete_product(State(backend): State<Arc<Backend>>, Path(id): Path<i64>) -> StatusCode {
    let mut products = lock(&backend.products);
    let before = products.len();
    products.retain(|product| product["id"] != id);
    if products.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

// =============================================================================
// Auth
// =============================================================================

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == VALID_USERNAME && body["password"] == VALID_PASSWORD {
        Json(json!({
            "token": VALID_TOKEN,
            "user": {
                "id": VALID_USER_ID,
                "username": VALID_USERNAME,
                "email": "pao@example.com"
            }
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Credenciales inválidas" })),
        )
            .into_response()
    }
}

async fn register(
    State(backend): State<Arc<Backend>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({
            "id": backend.next_id(),
            "username": body["username"],
            "email": body["email"]
        })),
    )
}

// =============================================================================
// Cart
// =============================================================================

async fn get_cart(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    if !is_authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(Value::Array(lock(&backend.cart).clone())))
}

async fn add_to_cart(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    if !is_authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let item = json!({
        "id": backend.next_id(),
        "productoId": body["productoId"],
        "cantidad": body["cantidad"]
    });
    lock(&backend.cart).push(item.clone());
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_cart_item(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if !is_authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let mut cart = lock(&backend.cart);
    let item = cart
        .iter_mut()
        .find(|item| item["id"] == id)
        .and_then(Value::as_object_mut)
        .ok_or(StatusCode::NOT_FOUND)?;
    item.insert("cantidad".to_string(), body["cantidad"].clone());
    Ok(Json(Value::Object(item.clone())))
}

async fn remove_cart_item(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> StatusCode {
    if !is_authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    lock(&backend.cart).retain(|item| item["id"] != id);
    StatusCode::NO_CONTENT
}

async fn clear_cart(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> StatusCode {
    if !is_authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    lock(&backend.cart).clear();
    StatusCode::NO_CONTENT
}

// =============================================================================
// Comments
// =============================================================================

async fn list_comments(State(backend): State<Arc<Backend>>, Path(id): Path<i64>) -> Json<Value> {
    let matching = lock(&backend.comments)
        .iter()
        .filter(|comment| comment["productoId"] == id)
        .cloned()
        .collect();
    Json(Value::Array(matching))
}

async fn create_comment(
    State(backend): State<Arc<Backend>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    if body["comentario"].as_str().is_none_or(|text| text.trim().is_empty()) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let author = if body["usuarioId"] == VALID_USER_ID {
        VALID_USERNAME
    } else {
        "Usuario"
    };
    let comment = json!({
        "id": backend.next_id(),
        "nombre": author,
        "comentario": body["comentario"],
        "fecha": "17 oct 2026",
        "productoId": body["productoId"]
    });
    lock(&backend.comments).push(comment.clone());
    Ok((StatusCode::CREATED, Json(comment)))
}
