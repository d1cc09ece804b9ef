//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use roost_app::auth::Principal;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }
}

/// Principal plumbing between the auth middleware and handlers.
///
/// The principal travels explicitly through the depot; handlers never read
/// credentials from anywhere else.
pub(crate) trait DepotAuthExt {
    fn insert_principal(&mut self, principal: Principal);
    fn principal_or_401(&self) -> Result<Principal, StatusError>;
    fn admin_or_403(&self) -> Result<Principal, StatusError>;
}

impl DepotAuthExt for Depot {
    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal_or_401(&self) -> Result<Principal, StatusError> {
        self.obtain::<Principal>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn admin_or_403(&self) -> Result<Principal, StatusError> {
        let principal = self.principal_or_401()?;

        if !principal.role.is_admin() {
            return Err(StatusError::forbidden().brief("Admin role required"));
        }

        Ok(principal)
    }
}
