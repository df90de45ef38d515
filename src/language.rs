use std::path::Path;

/// Fence tag for a file, derived from its extension. Unknown extensions get
/// an empty tag, which renders as a plain fence.
pub fn detect_language(path: &Path) -> &'static str {
    let ext = match path.extension() {
        Some(ext) => ext.to_string_lossy().to_lowercase(),
        None => return "",
    };
    match ext.as_str() {
        "py" => "python",
        "js" => "javascript",
        "ts" => "typescript",
        "json" => "json",
        "html" => "html",
        "css" => "css",
        "sh" => "bash",
        "bat" | "cmd" => "bat",
        "java" => "java",
        "c" => "c",
        "cpp" => "cpp",
        "md" => "markdown",
        _ => "",
    }
}
