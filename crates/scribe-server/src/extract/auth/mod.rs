//! Bearer token authentication.
//!
//! - [`AuthHeader`] pulls the raw token out of `Authorization: Bearer <token>`
//! - [`AuthState`] verifies it against [`SessionKeys`] and exposes the claims
//!
//! Every failure is reported to the client as the same `401 Unauthorized`
//! body. The specific reason is only logged.
//!
//! [`SessionKeys`]: crate::service::SessionKeys

mod auth_header;
mod auth_state;

pub use self::auth_header::AuthHeader;
pub use self::auth_state::AuthState;

use crate::handler::{Error, ErrorKind};

/// The uniform rejection for unauthenticated requests.
pub(crate) fn authentication_required() -> Error<'static> {
    ErrorKind::Unauthorized.with_message("Authentication required.")
}
