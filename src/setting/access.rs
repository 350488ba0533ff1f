use super::registry::lookup;
use crate::Error;

/// Returns the current value of setting `id` in `content`.
///
/// `Ok(None)` means the constant is not defined (or not defined with a
/// literal of the expected shape).
pub fn get(content: impl AsRef<[u8]>, id: &str) -> Result<Option<String>, Error> {
    Ok(lookup(id)?.extract(content.as_ref()))
}

/// Returns the current value of setting `id`, failing when it is missing or
/// defined with a value of the wrong shape.
pub fn require(content: impl AsRef<[u8]>, id: &str) -> Result<String, Error> {
    let stmt = lookup(id)?.require(content.as_ref())?;
    Ok(stmt.value.text().to_string())
}

/// Returns `content` with setting `id` rewritten to `value`.
///
/// Only the first matching statement is changed and every other byte is
/// kept, whatever its encoding. A missing statement is an error; nothing is
/// ever inserted.
pub fn set(content: impl AsRef<[u8]>, id: &str, value: &str) -> Result<Vec<u8>, Error> {
    let content = content.as_ref();
    let def = lookup(id)?;
    def.validate(value)?;

    let stmt = def.require(content)?;
    let replacement = def.format(content, &stmt, value);

    tracing::debug!(
        constant = def.constant,
        from = stmt.value.text(),
        to = value,
        offset = stmt.span.start,
        "rewriting statement"
    );

    let mut updated = Vec::with_capacity(content.len() + replacement.len());
    updated.extend_from_slice(&content[..stmt.span.start]);
    updated.extend_from_slice(&replacement);
    updated.extend_from_slice(&content[stmt.span.end..]);
    Ok(updated)
}
