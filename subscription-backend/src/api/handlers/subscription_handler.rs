// src/api/handlers/subscription_handler.rs
use crate::api::dto::subscription_dto::{
    CreateSubscriptionDto, SubscriptionListQuery, TotalPriceQuery, UpdateSubscriptionDto,
};
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::extractors::{ValidatedJson, ValidatedQuery, ValidatedUuid};
use crate::logging::RequestContext;
use crate::types::ApiResponse;
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use tracing::info;

type Context = Option<Extension<RequestContext>>;

fn respond<T>(data: T, context: Context) -> ApiResponse<T> {
    let response = ApiResponse::success(data);
    match context {
        Some(Extension(ctx)) => response.with_request_id(ctx.request_id),
        None => response,
    }
}

// --- CRUD Handlers ---

pub async fn create_subscription_handler(
    State(app_state): State<AppState>,
    context: Context,
    ValidatedJson(payload): ValidatedJson<CreateSubscriptionDto>,
) -> AppResult<impl IntoResponse> {
    let created = app_state
        .subscription_service
        .create_subscription(payload)
        .await?;

    info!(subscription_id = %created.id, "Subscription created via API");
    Ok((StatusCode::CREATED, respond(created, context)))
}

pub async fn get_subscription_handler(
    State(app_state): State<AppState>,
    context: Context,
    ValidatedUuid(id): ValidatedUuid,
) -> AppResult<impl IntoResponse> {
    let subscription = app_state
        .subscription_service
        .get_subscription(id)
        .await?
        .ok_or_else(|| AppError::NotFound("subscription not found".to_string()))?;

    Ok(respond(subscription, context))
}

pub async fn list_subscriptions_handler(
    State(app_state): State<AppState>,
    context: Context,
    ValidatedQuery(query): ValidatedQuery<SubscriptionListQuery>,
) -> AppResult<impl IntoResponse> {
    let subscriptions = app_state
        .subscription_service
        .list_subscriptions(query)
        .await?;

    Ok(respond(subscriptions, context))
}

pub async fn update_subscription_handler(
    State(app_state): State<AppState>,
    context: Context,
    ValidatedUuid(id): ValidatedUuid,
    ValidatedJson(payload): ValidatedJson<UpdateSubscriptionDto>,
) -> AppResult<impl IntoResponse> {
    let result = app_state
        .subscription_service
        .update_subscription(id, payload)
        .await?;

    Ok(respond(result, context))
}

pub async fn delete_subscription_handler(
    State(app_state): State<AppState>,
    context: Context,
    ValidatedUuid(id): ValidatedUuid,
) -> AppResult<impl IntoResponse> {
    let result = app_state.subscription_service.delete_subscription(id).await?;

    info!(subscription_id = %id, "Subscription deleted via API");
    Ok(respond(result, context))
}

pub async fn total_price_handler(
    State(app_state): State<AppState>,
    context: Context,
    ValidatedQuery(query): ValidatedQuery<TotalPriceQuery>,
) -> AppResult<impl IntoResponse> {
    let total = app_state.subscription_service.total_price(query).await?;

    Ok(respond(total, context))
}

// --- Router ---

pub fn subscription_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/create", post(create_subscription_handler))
        .route("/api/info/{id}", get(get_subscription_handler))
        .route("/api/list", get(list_subscriptions_handler))
        .route("/api/update/{id}", put(update_subscription_handler))
        .route("/api/delete/{id}", delete(delete_subscription_handler))
        .route("/api/total", get(total_price_handler))
        .with_state(app_state)
}
