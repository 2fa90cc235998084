//! Drop-in replacements for axum's extractors that reject with [`Error`].
//!
//! [`Error`]: crate::handler::Error

pub mod enhanced_json;
pub mod enhanced_path;
pub mod enhanced_query;
pub mod validated_json;

pub use self::enhanced_json::Json;
pub use self::enhanced_path::Path;
pub use self::enhanced_query::Query;
pub use self::validated_json::ValidateJson;

/// Collapses an error message to its first lines and caps its length.
pub(crate) fn sanitize_error_message(message: &str, max_lines: usize, max_chars: usize) -> String {
    let lines = message.lines().take(max_lines).collect::<Vec<_>>();
    lines.join(" ").chars().take(max_chars).collect()
}
