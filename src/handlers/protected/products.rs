// handlers/protected/products.rs - /products/ resource
//
// Every route here is registered with `Access::RequiresAuth`; the bearer
// middleware has already put an `AuthUser` into the request extensions.

use axum::extract::{Extension, Path, State};

use crate::api::validate::{validate_product_create, validate_product_patch, validate_product_replace};
use crate::api::{products_to_views, ProductView};
use crate::database::models::ProductChanges;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody};
use crate::state::AppState;

/// GET /products/ - All products, most recently created first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ProductView>> {
    let products = state.store.products.list().await?;
    tracing::debug!("Listing {} products", products.len());
    Ok(ApiResponse::success(products_to_views(&products)))
}

/// POST /products/ - Create a product
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonBody(body): JsonBody,
) -> ApiResult<ProductView> {
    let draft = validate_product_create(&body)?;
    let product = state.store.products.create(draft).await?;
    tracing::info!(user_id = %user.user_id, "{} created product {}", user.username, product.id);
    Ok(ApiResponse::created(ProductView::from(&product)))
}

/// GET /products/:id/ - One product
pub async fn retrieve(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<ProductView> {
    let id = parse_id(&id)?;
    let product = state.store.products.get(id).await?;
    Ok(ApiResponse::success(ProductView::from(&product)))
}

/// PUT /products/:id/ - Full update; name and price are required
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<ProductView> {
    let id = parse_id(&id)?;
    let changes = validate_product_replace(&body)?;
    apply(&state, &user, id, changes).await
}

/// PATCH /products/:id/ - Partial update; absent fields keep their values
pub async fn partial_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<ProductView> {
    let id = parse_id(&id)?;
    let changes = validate_product_patch(&body)?;
    apply(&state, &user, id, changes).await
}

/// DELETE /products/:id/ - Permanent removal, 204 on success
pub async fn destroy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id)?;
    state.store.products.delete(id).await?;
    tracing::info!(user_id = %user.user_id, "{} deleted product {}", user.username, id);
    Ok(ApiResponse::no_content())
}

async fn apply(state: &AppState, user: &AuthUser, id: i64, changes: ProductChanges) -> ApiResult<ProductView> {
    let product = state.store.products.update(id, changes).await?;
    tracing::info!(user_id = %user.user_id, "{} updated product {}", user.username, product.id);
    Ok(ApiResponse::success(ProductView::from(&product)))
}

/// Ids that are not integers cannot exist, so they are a 404 like any unknown id
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::not_found(format!("Product {} not found", raw)))
}
