//! Response decoding: undoes the habit models have of wrapping JSON in a
//! Markdown code block even when told not to.

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
///
/// Every fence marker is removed, not only the outermost pair, so the result
/// never contains a triple backtick and a second pass is a no-op. Text without
/// fence markers is only trimmed. `None` stays `None`.
pub fn strip_json_fences(text: Option<&str>) -> Option<String> {
    let text = text?;
    if !text.contains(FENCE) {
        return Some(text.trim().to_string());
    }
    Some(
        text.replace(JSON_FENCE, "")
            .replace(FENCE, "")
            .trim()
            .to_string(),
    )
}
