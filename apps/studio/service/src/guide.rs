use std::path::Path;

/// Served in place of guide content when the guide file cannot be read.
pub const GUIDE_FALLBACK_TEXT: &str = "工具库指南内容未找到";

/// Reads the tool-library guide from disk. A missing or unreadable file is
/// not an HTTP error: the fallback text ships inside a normal response body,
/// and the read failure only surfaces as an operator diagnostic.
pub fn load_tool_guide(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "tool guide unavailable, serving fallback");
            GUIDE_FALLBACK_TEXT.to_string()
        }
    }
}
