//! Window Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roost_app::domain::availability::models::AvailabilityWindow;

use crate::{availability::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WindowResponse {
    /// The unique identifier of the window
    pub uuid: Uuid,

    /// Room the window applies to
    pub room_uuid: Uuid,

    /// First day covered (inclusive)
    pub start_date: String,

    /// First day no longer covered (exclusive)
    pub end_date: String,

    /// `available` or `blocked`
    pub kind: String,

    /// Optional host-provided reason
    pub reason: Option<String>,

    /// The date and time the window was created
    pub created_at: String,
}

impl From<AvailabilityWindow> for WindowResponse {
    fn from(window: AvailabilityWindow) -> Self {
        WindowResponse {
            uuid: window.uuid.into(),
            room_uuid: window.room_uuid.into(),
            start_date: window.start_date.to_string(),
            end_date: window.end_date.to_string(),
            kind: window.kind.as_str().to_string(),
            reason: window.reason,
            created_at: window.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WindowsResponse {
    /// The room's declared windows
    pub windows: Vec<WindowResponse>,
}

/// Window Index Handler
///
/// Returns a room's availability windows.
#[endpoint(
    tags("availability"),
    summary = "List Windows",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    room: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<WindowsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _principal = depot.principal_or_401()?;

    let windows = state
        .app
        .availability
        .list_windows(room.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(WindowsResponse {
        windows: windows.into_iter().map(Into::into).collect(),
    }))
}
