use crate::error::WaitlistError;
use crate::list::WaitingList;
use crate::roster::Roster;
use crate::store::WaitlistStore;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use whub_domain::constants::{WAITING_LIST_TABLE, WAITLIST_TAG};
use whub_domain::events::{AccountRemoved, WaitlistChanged};
use whub_domain::removal::{Removal, RemovalReason};
use whub_kernel::safe_nanoid;
use whub_kernel::security::resource::ResourceGuard;
use whub_kernel::server::ApiState;

/// Header carrying the pre-authorized actor id. Authorization itself
/// happens upstream; requests without it are rejected.
pub const ACTOR_HEADER: &str = "x-actor-id";

#[derive(Debug, Serialize, ToSchema)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for WaitlistError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Events(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "waitlist request failed");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

/// Manual edit payload for one account: notes and desired manual flag
/// states. Missing flag entries mean unmark; automatic flags are ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
}

/// Removal payload; the actor arrives via the `x-actor-id` header.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RemoveAccountRequest {
    pub reason: RemovalReason,
    #[serde(default)]
    pub custom_reason: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
struct ReasonOptionBody {
    value: &'static str,
    label: &'static str,
}

/// Payload for administratively opening a new waiting list.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateListRequest {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
struct CreateListResponse {
    id: String,
}

/// Rejects ids that belong to another table ("removal:xyz" against a
/// waiting-list route) and strips the table prefix for storage binding.
fn verified_list_id(raw: &str) -> Result<String, WaitlistError> {
    let id = ResourceGuard::verify(raw, WAITING_LIST_TABLE)
        .map_err(|error| WaitlistError::Validation { message: error.to_string().into() })?;
    Ok(ResourceGuard::bare_id(&id).to_owned())
}

#[utoipa::path(
    post,
    path = "/waiting-lists",
    request_body = CreateListRequest,
    responses(
        (status = CREATED, description = "Waiting list opened", body = CreateListResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Blank list name", body = ErrorBody),
    ),
    tag = WAITLIST_TAG,
)]
async fn create_list_handler(
    State(state): State<ApiState>,
    Json(payload): Json<CreateListRequest>,
) -> Result<(StatusCode, Json<CreateListResponse>), WaitlistError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(WaitlistError::Validation { message: "list name cannot be blank".into() });
    }

    let id = safe_nanoid!();
    let store = WaitlistStore::new(state.database.clone());
    store.create(&WaitingList::new(&id, name)).await?;

    Ok((StatusCode::CREATED, Json(CreateListResponse { id })))
}

#[utoipa::path(
    get,
    path = "/waiting-lists/{list_id}/accounts",
    params(("list_id" = String, Path, description = "Waiting list id")),
    responses(
        (status = OK, description = "Ordered roster projection", body = Roster),
        (status = NOT_FOUND, description = "Unknown waiting list", body = ErrorBody),
    ),
    tag = WAITLIST_TAG,
)]
async fn roster_handler(
    State(state): State<ApiState>,
    Path(list_id): Path<String>,
) -> Result<Json<Roster>, WaitlistError> {
    let list_id = verified_list_id(&list_id)?;
    let store = WaitlistStore::new(state.database.clone());
    let list = store.load(&list_id).await?;
    Ok(Json(Roster::project(&list)))
}

#[utoipa::path(
    patch,
    path = "/waiting-lists/{list_id}/accounts/{account_id}",
    params(
        ("list_id" = String, Path, description = "Waiting list id"),
        ("account_id" = String, Path, description = "Account id"),
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = NO_CONTENT, description = "Notes and manual flags updated"),
        (status = NOT_FOUND, description = "Unknown list or account", body = ErrorBody),
    ),
    tag = WAITLIST_TAG,
)]
async fn update_account_handler(
    State(state): State<ApiState>,
    Path((list_id, account_id)): Path<(String, String)>,
    Json(payload): Json<UpdateAccountRequest>,
) -> Result<StatusCode, WaitlistError> {
    let list_id = verified_list_id(&list_id)?;
    let store = WaitlistStore::new(state.database.clone());
    let mut list = store.load(&list_id).await?;

    if let Some(notes) = payload.notes {
        list.set_notes(&account_id, notes)?;
    }
    list.apply_manual_edits(&account_id, &payload.flags, Utc::now())?;
    store.save(&list).await?;

    notify_changed(&state, &list_id);
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/waiting-lists/{list_id}/accounts/{account_id}",
    params(
        ("list_id" = String, Path, description = "Waiting list id"),
        ("account_id" = String, Path, description = "Account id"),
    ),
    request_body = RemoveAccountRequest,
    responses(
        (status = NO_CONTENT, description = "Membership ended and removal recorded"),
        (status = UNAUTHORIZED, description = "Missing x-actor-id header", body = ErrorBody),
        (status = UNPROCESSABLE_ENTITY, description = "'other' without custom reason", body = ErrorBody),
        (status = NOT_FOUND, description = "Unknown list or account", body = ErrorBody),
    ),
    tag = WAITLIST_TAG,
)]
async fn remove_account_handler(
    State(state): State<ApiState>,
    Path((list_id, account_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(payload): Json<RemoveAccountRequest>,
) -> Result<StatusCode, Response> {
    let Some(actor) = headers.get(ACTOR_HEADER).and_then(|value| value.to_str().ok()) else {
        let body = ErrorBody { error: format!("missing '{ACTOR_HEADER}' header") };
        return Err((StatusCode::UNAUTHORIZED, Json(body)).into_response());
    };
    let removal = Removal::new(payload.reason, actor, payload.custom_reason);

    let list_id = verified_list_id(&list_id).map_err(IntoResponse::into_response)?;
    let store = WaitlistStore::new(state.database.clone());
    let mut list = store.load(&list_id).await.map_err(IntoResponse::into_response)?;
    let removed = list
        .remove_account(&account_id, &removal, Utc::now())
        .map_err(IntoResponse::into_response)?;
    store.save(&list).await.map_err(IntoResponse::into_response)?;

    notify_removed(&state, removed);
    notify_changed(&state, &list_id);
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/waiting-lists/removal-reasons",
    responses((status = OK, description = "Reason options for selection UIs", body = [ReasonOptionBody])),
    tag = WAITLIST_TAG,
)]
async fn removal_reasons_handler() -> Json<Vec<ReasonOptionBody>> {
    let options = RemovalReason::form_options()
        .into_iter()
        .map(|option| ReasonOptionBody { value: option.value, label: option.label })
        .collect();
    Json(options)
}

/// Removal is already committed when these fire; delivery failures are
/// logged, never surfaced to the caller.
fn notify_removed(state: &ApiState, event: AccountRemoved) {
    if let Err(error) = state.events.publish_mpsc(event) {
        tracing::warn!(%error, "failed to queue removal audit event");
    }
}

fn notify_changed(state: &ApiState, list_id: &str) {
    if let Err(error) = state.events.publish(WaitlistChanged { waitlist_id: list_id.to_owned() }) {
        tracing::warn!(%error, "failed to broadcast waitlist change");
    }
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(create_list_handler))
        .routes(routes!(roster_handler))
        .routes(routes!(update_account_handler, remove_account_handler))
        .routes(routes!(removal_reasons_handler))
}
