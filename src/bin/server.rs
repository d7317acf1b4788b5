//! REST API server for PAN validation and classification.
//!
//! # Usage
//!
//! ```bash
//! # Start server
//! panvalidator-server
//!
//! # With custom port
//! panvalidator-server --port 8080
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:3000/swagger-ui/ for interactive API documentation.

use axum::{
    extract::Query,
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use pan_validator::{
    classify, classify::ranges, classify_checked, generate, mask, parse_pan_components,
    BatchParser, Component, Pan, PanError, Product,
};

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PAN Validator API",
        version = "0.1.0",
        description = "ISO/IEC 7812-1 primary account number parsing, Luhn validation and product classification. No auth or rate limiting.",
        license(name = "MIT OR Apache-2.0"),
        contact(name = "API Support")
    ),
    tags(
        (name = "Parsing", description = "PAN parsing and validation"),
        (name = "Classification", description = "Product classification from the issuer identifier"),
        (name = "Generation", description = "Test PAN generation"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(
        parse_handler,
        parse_components_handler,
        parse_batch_handler,
        classify_handler,
        ranges_handler,
        generate_handler,
        health,
    ),
    components(schemas(
        ParseRequest,
        ComponentsRequest,
        PanResponse,
        ErrorResponse,
        BatchParseRequest,
        BatchParseResponse,
        BatchEntry,
        BatchSummary,
        ClassifyQuery,
        ClassifyResponse,
        RangeResponse,
        GenerateRequest,
        GenerateResponse,
        HealthResponse,
    ))
)]
struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"pan": "4000000000000002"}))]
struct ParseRequest {
    /// PAN to parse. Digits only unless `lenient` is set.
    pan: String,
    /// Accept spaces and hyphens between digit groups
    #[serde(default)]
    lenient: bool,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"issuer_identifier": "601100", "account_identifier": "000000000", "check_digit": "4"}))]
struct ComponentsRequest {
    /// Issuer identification number, exactly 6 digits
    issuer_identifier: String,
    /// Individual account identifier, 1 to 12 digits
    account_identifier: String,
    /// Check digit, a single digit
    check_digit: String,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "issuer_identifier": "400000",
    "major_industry_identifier": 4,
    "account_identifier_width": 9,
    "check_digit": 2,
    "length": 16,
    "product": "Visa",
    "masked": "****-****-****-0002"
}))]
struct PanResponse {
    /// Six-digit issuer identification number
    issuer_identifier: String,
    /// First digit of the issuer identifier
    major_industry_identifier: u8,
    /// Number of digits in the account identifier (the digits themselves are never returned)
    account_identifier_width: usize,
    /// Luhn check digit
    check_digit: u8,
    /// Total number of digits
    length: usize,
    /// Classified product, absent when no range matches
    #[serde(skip_serializing_if = "Option::is_none")]
    product: Option<String>,
    /// Masked PAN, safe for logging and display
    masked: String,
}

impl From<&Pan> for PanResponse {
    fn from(pan: &Pan) -> Self {
        Self {
            issuer_identifier: pan.issuer_identifier_string(),
            major_industry_identifier: pan.major_industry_identifier(),
            account_identifier_width: pan.account_identifier_width(),
            check_digit: pan.check_digit(),
            length: pan.length(),
            product: classify(pan).map(|p| p.name().to_string()),
            masked: pan.masked(),
        }
    }
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "error": "check digit 3 does not match Luhn check digit 2",
    "kind": "ChecksumMismatch",
    "component": "check digit"
}))]
struct ErrorResponse {
    /// Human-readable error message
    error: String,
    /// Error kind: MissingInput, InvalidLength, InvalidCharacters, ChecksumMismatch or InvalidLengthForProduct
    kind: String,
    /// Component the error refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    component: Option<String>,
}

impl From<&PanError> for ErrorResponse {
    fn from(e: &PanError) -> Self {
        Self {
            error: e.to_string(),
            kind: format!("{:?}", e.kind()),
            component: e.component().map(|c| c.name().to_string()),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn unprocessable(e: &PanError) -> ApiError {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorResponse::from(e)))
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"pans": ["4000000000000002", "6011000000000004", "4000000000000003"]}))]
struct BatchParseRequest {
    /// PANs to parse
    pans: Vec<String>,
    /// Accept spaces and hyphens between digit groups
    #[serde(default)]
    lenient: bool,
}

#[derive(Serialize, ToSchema)]
struct BatchEntry {
    /// Whether this PAN parsed
    valid: bool,
    /// Parsed PAN, present when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pan: Option<PanResponse>,
    /// Parse error, present when invalid
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorResponse>,
}

#[derive(Serialize, ToSchema)]
struct BatchParseResponse {
    /// Results in input order
    results: Vec<BatchEntry>,
    /// Summary statistics
    summary: BatchSummary,
}

#[derive(Serialize, ToSchema)]
struct BatchSummary {
    /// Total PANs processed
    total: usize,
    /// Number of valid PANs
    valid: usize,
    /// Number of invalid PANs
    invalid: usize,
}

#[derive(Deserialize, ToSchema, IntoParams)]
struct ClassifyQuery {
    /// PAN to classify
    pan: String,
    /// Also check the PAN length against the product's lengths
    #[serde(default)]
    check_length: bool,
}

#[derive(Serialize, ToSchema)]
struct ClassifyResponse {
    /// Classified product, absent when no range matches
    product: Option<String>,
    /// Lengths the product issues
    valid_lengths: Option<Vec<u8>>,
}

#[derive(Serialize, ToSchema)]
struct RangeResponse {
    /// Priority (1 is checked first)
    priority: usize,
    /// Lowest IIN in the range
    low: u32,
    /// Highest IIN in the range
    high: u32,
    /// Product assigned to the range
    product: String,
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({"product": "solo", "count": 3}))]
struct GenerateRequest {
    /// Product to generate: amex, discover, jcb, mastercard, maestro, solo or visa
    product: String,
    /// Number of test PANs to generate (1-100, default: 1)
    #[serde(default = "default_count")]
    count: usize,
}

fn default_count() -> usize {
    1
}

#[derive(Serialize, ToSchema)]
struct GenerateResponse {
    /// Generated PANs
    pans: Vec<String>,
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service status
    status: String,
    /// API version
    version: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Parse and validate a PAN
#[utoipa::path(
    post,
    path = "/parse",
    request_body = ParseRequest,
    responses(
        (status = 200, description = "Parsed PAN", body = PanResponse),
        (status = 422, description = "Validation failure", body = ErrorResponse)
    ),
    tag = "Parsing"
)]
async fn parse_handler(Json(req): Json<ParseRequest>) -> Result<Json<PanResponse>, ApiError> {
    let result = if req.lenient {
        Pan::parse_formatted(&req.pan)
    } else {
        Pan::parse(&req.pan)
    };
    match result {
        Ok(pan) => Ok(Json(PanResponse::from(&pan))),
        Err(e) => {
            tracing::debug!(input = %mask::mask_string(&req.pan), error = %e, "rejected");
            Err(unprocessable(&e))
        }
    }
}

/// Build a PAN from its three components
#[utoipa::path(
    post,
    path = "/parse/components",
    request_body = ComponentsRequest,
    responses(
        (status = 200, description = "Parsed PAN", body = PanResponse),
        (status = 422, description = "Validation failure", body = ErrorResponse)
    ),
    tag = "Parsing"
)]
async fn parse_components_handler(
    Json(req): Json<ComponentsRequest>,
) -> Result<Json<PanResponse>, ApiError> {
    let mut chars = req.check_digit.chars();
    let check = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        (None, _) => {
            return Err(unprocessable(&PanError::MissingInput {
                component: Component::CheckDigit,
            }))
        }
        (Some(_), Some(_)) => {
            return Err(unprocessable(&PanError::InvalidLength {
                component: Component::CheckDigit,
                length: req.check_digit.chars().count(),
                minimum: 1,
                maximum: 1,
            }))
        }
    };

    parse_pan_components(&req.issuer_identifier, &req.account_identifier, check)
        .map(|pan| Json(PanResponse::from(&pan)))
        .map_err(|e| unprocessable(&e))
}

/// Parse many PANs
#[utoipa::path(
    post,
    path = "/parse/batch",
    request_body = BatchParseRequest,
    responses(
        (status = 200, description = "Batch parse results", body = BatchParseResponse)
    ),
    tag = "Parsing"
)]
async fn parse_batch_handler(Json(req): Json<BatchParseRequest>) -> Json<BatchParseResponse> {
    let results: Vec<BatchEntry> = BatchParser::new()
        .allow_separators(req.lenient)
        .parse_all(&req.pans)
        .iter()
        .map(|result| match result {
            Ok(pan) => BatchEntry {
                valid: true,
                pan: Some(PanResponse::from(pan)),
                error: None,
            },
            Err(e) => BatchEntry {
                valid: false,
                pan: None,
                error: Some(ErrorResponse::from(e)),
            },
        })
        .collect();

    let valid_count = results.iter().filter(|r| r.valid).count();
    tracing::info!(total = results.len(), valid = valid_count, "batch parsed");

    Json(BatchParseResponse {
        summary: BatchSummary {
            total: results.len(),
            valid: valid_count,
            invalid: results.len() - valid_count,
        },
        results,
    })
}

/// Classify a PAN by its issuer identifier
#[utoipa::path(
    get,
    path = "/classify",
    params(ClassifyQuery),
    responses(
        (status = 200, description = "Classified product", body = ClassifyResponse),
        (status = 422, description = "Invalid PAN or length not issued by the product", body = ErrorResponse)
    ),
    tag = "Classification"
)]
async fn classify_handler(
    Query(query): Query<ClassifyQuery>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let pan = Pan::parse(&query.pan).map_err(|e| unprocessable(&e))?;
    let product = if query.check_length {
        classify_checked(&pan).map_err(|e| unprocessable(&e))?
    } else {
        classify(&pan)
    };

    Ok(Json(ClassifyResponse {
        product: product.map(|p| p.name().to_string()),
        valid_lengths: product.map(|p| p.pan_lengths().to_vec()),
    }))
}

/// List the IIN range table in priority order
#[utoipa::path(
    get,
    path = "/ranges",
    responses(
        (status = 200, description = "IIN ranges", body = [RangeResponse])
    ),
    tag = "Classification"
)]
async fn ranges_handler() -> Json<Vec<RangeResponse>> {
    Json(
        ranges()
            .iter()
            .enumerate()
            .map(|(i, range)| RangeResponse {
                priority: i + 1,
                low: range.low,
                high: range.high,
                product: range.product.name().to_string(),
            })
            .collect(),
    )
}

/// Generate test PANs
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated PANs", body = GenerateResponse),
        (status = 400, description = "Unknown product")
    ),
    tag = "Generation"
)]
async fn generate_handler(
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, String)> {
    let product: Product = req
        .product
        .parse()
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("{}", e)))?;

    let count = req.count.min(100);
    let pans = (0..count).map(|_| generate::generate_pan(product)).collect();

    Ok(Json(GenerateResponse { pans }))
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Main
// ============================================================================

fn app() -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/parse", post(parse_handler))
        .route("/parse/components", post(parse_components_handler))
        .route("/parse/batch", post(parse_batch_handler))
        .route("/classify", get(classify_handler))
        .route("/ranges", get(ranges_handler))
        .route("/generate", post(generate_handler))
        .route("/health", get(health))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = std::env::args()
        .skip_while(|a| a != "--port")
        .nth(1)
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui/", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app()).await
}
