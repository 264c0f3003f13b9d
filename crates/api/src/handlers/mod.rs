//! Request handlers, one module per resource.

pub mod auth;
pub mod courses;
pub mod favorites;
pub mod lookup;
pub mod payments;
pub mod support;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Render stored icon bytes as a `data:` URI for JSON responses, or
/// `None` when the course has no icon.
pub(crate) fn icon_data_uri(icon: Option<&[u8]>) -> Option<String> {
    icon.map(|bytes| format!("data:image/png;base64,{}", BASE64.encode(bytes)))
}

/// Decode stored page bytes back into markdown text.
///
/// Pages are written as UTF-8, so the lossy decode only matters for
/// rows imported from elsewhere.
pub(crate) fn page_text(content: &[u8]) -> String {
    String::from_utf8_lossy(content).into_owned()
}
