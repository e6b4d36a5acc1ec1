//! DTO for the link update endpoint.

use serde::Deserialize;

use crate::domain::entities::LinkUpdate;

/// Request body for `PUT /update/{code}`.
///
/// Both fields replace the stored values. An `expires_at` in the body is ignored;
/// expiry cannot be changed after creation.
#[derive(Debug, Deserialize)]
pub struct UpdateLinkRequest {
    /// New destination URL for this link.
    #[serde(default)]
    pub long_url: String,

    /// New visibility, normalized like on creation.
    #[serde(default)]
    pub visibility: Option<String>,
}

impl From<UpdateLinkRequest> for LinkUpdate {
    fn from(req: UpdateLinkRequest) -> Self {
        LinkUpdate {
            long_url: req.long_url,
            visibility: req.visibility,
        }
    }
}
