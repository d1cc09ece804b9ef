//! Delete Room Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, rooms::errors::into_status_error, state::State};

/// Delete Room Handler
///
/// Soft-deletes a room; existing bookings are untouched.
#[endpoint(tags("rooms"), summary = "Delete Room", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    room: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _admin = depot.admin_or_403()?;

    state
        .app
        .rooms
        .delete_room(room.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
