//! The identity a request is made on behalf of

use uuid::Uuid;

use crate::error::ApiError;

/// The current viewer of one request, as vouched for by the upstream
/// authentication layer
///
/// `Viewer(None)` is an anonymous request. The value is placed in the GraphQL
/// request data once per request and never changed afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewer(pub Option<Uuid>);

impl Viewer {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn user(user_id: Uuid) -> Self {
        Self(Some(user_id))
    }

    pub fn id(&self) -> Option<Uuid> {
        self.0
    }

    /// The viewer's id, or `Unauthorized` for anonymous requests
    pub fn require(&self) -> Result<Uuid, ApiError> {
        self.0.ok_or(ApiError::Unauthorized)
    }

    /// Parse a header value; blank or malformed ids are treated as anonymous
    pub fn from_header_value(value: Option<&str>) -> Self {
        let parsed = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .and_then(|v| Uuid::parse_str(v).ok());
        Self(parsed)
    }
}
