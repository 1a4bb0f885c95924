// File: novel-utils/src/anchor.rs
// Purpose: Scroll the page to an element by id

use crate::context::Document;
use crate::error::{Result, UtilError};
use tracing::debug;

/// Scrolls the page so the element with `id` sits at the top
///
/// Fails with [`UtilError::ElementNotFound`] instead of scrolling anywhere
/// when the id does not resolve.
///
/// # Examples
///
/// ```
/// use novel_utils::{scroll_to_anchor, Document, MemoryDocument};
///
/// let document = MemoryDocument::new().with_element("chapter-3", 1200.0);
/// scroll_to_anchor(&document, "chapter-3").unwrap();
/// assert_eq!(document.scroll_top(), 1200.0);
///
/// assert!(scroll_to_anchor(&document, "chapter-9").is_err());
/// ```
pub fn scroll_to_anchor<D: Document + ?Sized>(document: &D, id: &str) -> Result<()> {
    let offset = document
        .element_offset_top(id)
        .ok_or_else(|| UtilError::ElementNotFound(id.to_string()))?;

    debug!(id, offset, "scrolling to anchor");
    document.set_scroll_top(offset);
    Ok(())
}
