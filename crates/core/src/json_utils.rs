//! JSON helpers shared across crates.

/// Strip a markdown code fence from collaborator output.
///
/// Models routinely wrap JSON answers in `` ```json ... ``` `` (or a fence
/// with another language tag). Returns the inner content, or the trimmed
/// input when no fence is present.
#[must_use]
pub fn strip_markdown_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```").and_then(|s| s.strip_suffix("```")) else {
        return trimmed;
    };
    // First line of the fence is the (optional) language tag.
    match inner.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => inner.trim(),
    }
}
