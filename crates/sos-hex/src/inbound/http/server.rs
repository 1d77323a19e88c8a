use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    response::Html,
    routing::{get, post},
    serve, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::application::order_service::OrderService;
use crate::config::SERVICE_NAME;
use crate::errors::AppError;
use sos_types::domain::due_date::{parse_due_date, to_canonical};
use sos_types::domain::order::{Order, OrderDraft, DUE_DATE_FIELD};
use sos_types::ports::order_store::OrderStore;

/// Product types offered on the intake form.
const PRODUCT_TYPES: &[&str] = &["Guitar", "Piano", "Saxophone", "Flute", "Base", "Drums"];

#[derive(Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: String,
}

#[derive(Clone)]
pub struct HttpServer<S>
where
    S: OrderStore,
{
    pub service: Arc<OrderService<S>>,
    pub config: HttpServerConfig,
}

/// Form-encoded order submission: all fields are required keys, matching the
/// fields rendered by the intake form.
#[derive(Deserialize)]
struct OrderForm {
    name: String,
    address: String,
    city: String,
    state: String,
    zipcode: String,
    #[serde(rename = "dueDate")]
    due_date: String,
    #[serde(rename = "productType")]
    product_type: String,
}

impl OrderForm {
    /// Human-typed due dates are normalized to the canonical form before
    /// validation; a date in neither accepted format is rejected here.
    fn into_draft(self) -> Result<OrderDraft, AppError> {
        let due_date = match parse_due_date(&self.due_date) {
            Ok(Some(date)) => to_canonical(date),
            Ok(None) => String::new(),
            Err(e) => return Err(AppError::BadRequest(e.to_string())),
        };
        let mut draft = OrderDraft::new();
        draft
            .set("name", self.name)
            .set("address", self.address)
            .set("city", self.city)
            .set("state", self.state)
            .set("zipcode", self.zipcode)
            .set(DUE_DATE_FIELD, due_date)
            .set("productType", self.product_type);
        Ok(draft)
    }
}

#[derive(Serialize)]
struct OrderEnvelope {
    order: Order,
}

#[derive(Serialize)]
struct OrdersEnvelope {
    orders: Vec<Order>,
}

impl<S> HttpServer<S>
where
    S: OrderStore,
{
    pub async fn new(service: OrderService<S>, config: HttpServerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            service: Arc::new(service),
            config,
        })
    }

    pub fn router(&self) -> Router {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri
                )
            })
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        let svc = self.service.clone();
        Router::new()
            .route("/", get(order_form))
            .route("/hostname", get(hostname))
            .route("/health", get(health))
            .route(&format!("/{SERVICE_NAME}/orders"), post(create_order::<S>))
            .route(&format!("/{SERVICE_NAME}/orders"), get(list_orders::<S>))
            .route(
                &format!("/{SERVICE_NAME}/orders/{{id}}"),
                get(get_order::<S>),
            )
            .fallback(not_found)
            .layer(trace_layer)
            .with_state(svc)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let app = self.router();
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

/// HTML intake form listing the available product types.
async fn order_form() -> Html<String> {
    let options: String = PRODUCT_TYPES
        .iter()
        .map(|p| format!("<option value=\"{p}\">{p}</option>"))
        .collect();
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{name} Order Entry</title></head>\n<body>\n\
         <h1>{name} Order Entry</h1>\n\
         <form action=\"/{service}/orders\" method=\"post\">\n\
         <label>Name <input name=\"name\"></label><br>\n\
         <label>Address <input name=\"address\"></label><br>\n\
         <label>City <input name=\"city\"></label><br>\n\
         <label>State <input name=\"state\"></label><br>\n\
         <label>Zipcode <input name=\"zipcode\"></label><br>\n\
         <label>Due date <input name=\"dueDate\" placeholder=\"MM/DD/YYYY\"></label><br>\n\
         <label>Product <select name=\"productType\">{options}</select></label><br>\n\
         <button type=\"submit\">Submit</button>\n\
         </form>\n</body>\n</html>\n",
        name = SERVICE_NAME.to_uppercase(),
        service = SERVICE_NAME,
    ))
}

/// Echoes the container hostname, `None` outside a container.
async fn hostname() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "None".into())
}

async fn health() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}

async fn not_found() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found" })),
    )
}

/// Decodes a candidate order from either supported body encoding.
fn decode_draft(headers: &HeaderMap, body: &[u8]) -> Result<OrderDraft, AppError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if content_type.starts_with("application/json") {
        serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("invalid json body: {e}")))
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let form: OrderForm = serde_urlencoded::from_bytes(body)
            .map_err(|e| AppError::BadRequest(format!("invalid form body: {e}")))?;
        form.into_draft()
    } else {
        Err(AppError::BadRequest(format!(
            "unsupported content type: {content_type}"
        )))
    }
}

async fn create_order<S>(
    State(service): State<Arc<OrderService<S>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Order>, AppError>
where
    S: OrderStore,
{
    let draft = decode_draft(&headers, &body)?;
    let order = service.create_order(draft).await?;
    Ok(Json(order))
}

async fn get_order<S>(
    State(service): State<Arc<OrderService<S>>>,
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<OrderEnvelope>, AppError>
where
    S: OrderStore,
{
    let order = service.get_order(&id).await?;
    Ok(Json(OrderEnvelope { order }))
}

async fn list_orders<S>(
    State(service): State<Arc<OrderService<S>>>,
) -> Result<Json<OrdersEnvelope>, AppError>
where
    S: OrderStore,
{
    let orders = service.list_orders().await?;
    Ok(Json(OrdersEnvelope { orders }))
}
