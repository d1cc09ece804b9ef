//! Create Window Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roost_app::domain::availability::models::{NewWindow, WindowKind};

use crate::{availability::errors::into_status_error, extensions::*, state::State};

/// Create Window Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateWindowRequest {
    pub uuid: Uuid,
    pub start_date: String,
    pub end_date: String,
    pub kind: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Window Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WindowCreatedResponse {
    /// Created window UUID
    pub uuid: Uuid,
}

/// Create Window Handler
#[endpoint(
    tags("availability"),
    summary = "Create Window",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Window created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    room: PathParam<Uuid>,
    json: JsonBody<CreateWindowRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<WindowCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _admin = depot.admin_or_403()?;

    let room_uuid = room.into_inner();
    let request = json.into_inner();

    let kind = WindowKind::parse(&request.kind)
        .ok_or_else(|| StatusError::bad_request().brief("kind must be available or blocked"))?;

    let start_date = request
        .start_date
        .parse()
        .or_400("could not parse \"start_date\" field")?;
    let end_date = request
        .end_date
        .parse()
        .or_400("could not parse \"end_date\" field")?;

    let window = state
        .app
        .availability
        .create_window(NewWindow {
            uuid: request.uuid.into(),
            room_uuid: room_uuid.into(),
            start_date,
            end_date,
            kind,
            reason: request.reason,
        })
        .await
        .map_err(into_status_error)?;

    let uuid = window.uuid;

    res.add_header(LOCATION, format!("/rooms/{room_uuid}/windows/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(WindowCreatedResponse { uuid: uuid.into() }))
}
