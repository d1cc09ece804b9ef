//! Delete Window Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{availability::errors::into_status_error, extensions::*, state::State};

/// Delete Window Handler
#[endpoint(
    tags("availability"),
    summary = "Delete Window",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    room: PathParam<Uuid>,
    window: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _admin = depot.admin_or_403()?;

    state
        .app
        .availability
        .delete_window(room.into_inner().into(), window.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
