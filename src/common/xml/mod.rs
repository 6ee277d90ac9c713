//! Helpers shared by the streaming XML parsers.
//!
//! quick-xml reports character data as raw `Text` events and every entity
//! reference (`&amp;`, `&#x41;`) as a separate `GeneralRef` event. The
//! parsers collect both into a single string through [`push_text`] and
//! [`push_entity`].

use crate::common::Result;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesText};

/// Append the raw content of a text event.
#[inline]
pub fn push_text(out: &mut String, text: &BytesText<'_>) -> Result<()> {
    out.push_str(std::str::from_utf8(text.as_ref())?);
    Ok(())
}

/// Append the replacement text of an entity reference.
///
/// Handles the five predefined XML entities and numeric character
/// references. Any other entity is kept verbatim as `&name;`.
///
/// # Errors
/// Returns [`crate::Error::Xml`] for a malformed character reference such
/// as `&#xZZ;` or one naming a surrogate.
pub fn push_entity(out: &mut String, entity: &BytesRef<'_>) -> Result<()> {
    if let Some(ch) = entity.resolve_char_ref()? {
        out.push(ch);
        return Ok(());
    }

    let name = std::str::from_utf8(entity.as_ref())?;
    match resolve_predefined_entity(name) {
        Some(text) => out.push_str(text),
        None => {
            out.push('&');
            out.push_str(name);
            out.push(';');
        },
    }
    Ok(())
}
