use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde_json::{json, Value};
use shared::{
    DeliveryAddress, DeliveryAddressInput, DeliveryAddressPatch, SessionUser, SignInRequest,
    SignInResponse, UpdateManyResult,
};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

/// API router (static assets are attached in `main`)
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/signin", post(sign_in))
        .route("/api/auth/signout", post(sign_out))
        .route("/api/user/whoami", get(who_am_i))
        .route(
            "/api/delivery-addresses",
            get(list_addresses)
                .post(create_address)
                .patch(update_all_addresses),
        )
        .route("/api/delivery-addresses/{id}", patch(update_address))
}

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Sign in by display name; returns a session token
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".into()));
    }
    let response = state.store.sign_in(&request).await?;
    tracing::info!("User {} signed in", response.user.id);
    Ok(Json(response))
}

pub async fn sign_out(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    state.store.sign_out(&auth.token).await?;
    tracing::info!("User {} signed out", auth.user.id);
    Ok(StatusCode::NO_CONTENT)
}

/// Current session user
pub async fn who_am_i(auth: AuthUser) -> Json<SessionUser> {
    Json(auth.user)
}

pub async fn list_addresses(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<Vec<DeliveryAddress>> {
    Json(state.store.list_addresses(&auth.user.id).await)
}

pub async fn create_address(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<DeliveryAddressInput>,
) -> Result<(StatusCode, Json<DeliveryAddress>), ApiError> {
    let address = state.store.create_address(&auth.user.id, input).await?;
    tracing::info!("Created delivery address {} for {}", address.id, auth.user.id);
    Ok((StatusCode::CREATED, Json(address)))
}

/// Update a single address. The body may omit `id`; the path id always wins.
pub async fn update_address(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(mut patch): Json<DeliveryAddressPatch>,
) -> Result<Json<DeliveryAddress>, ApiError> {
    patch.id = id;
    state
        .store
        .update_address(&auth.user.id, &patch)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("delivery address '{}'", patch.id)))
}

/// Update many addresses at once
pub async fn update_all_addresses(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(patches): Json<Vec<DeliveryAddressPatch>>,
) -> Result<Json<Vec<UpdateManyResult>>, ApiError> {
    let results = state.store.update_addresses(&auth.user.id, &patches).await?;
    tracing::info!(
        "Updated {} of {} delivery addresses for {}",
        results.iter().map(|r| r.count).sum::<u64>(),
        patches.len(),
        auth.user.id
    );
    Ok(Json(results))
}
