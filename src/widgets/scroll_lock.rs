/// Page scroll lock
///
/// The body's `overflow` style is shared page state. Whoever acquires the
/// lock remembers what was there and puts exactly that back on release.
use crate::dom::Document;

const OVERFLOW: &str = "overflow";
const LOCKED: &str = "hidden";

#[derive(Debug, PartialEq)]
#[must_use = "a scroll lock must be released to restore page scrolling"]
pub struct ScrollLock {
    previous: Option<String>,
}

impl ScrollLock {
    /// Lock page scrolling
    pub fn acquire(doc: &mut Document) -> Self {
        let body = doc.body();
        let previous = doc.style_mut(body).set(OVERFLOW, LOCKED);
        log::debug!("🔒 Page scroll locked (was {:?})", previous);
        Self { previous }
    }

    /// Restore the overflow value seen at acquisition
    pub fn release(self, doc: &mut Document) {
        let body = doc.body();
        let style = doc.style_mut(body);
        match self.previous {
            Some(value) => {
                style.set(OVERFLOW, value);
            }
            None => {
                style.remove(OVERFLOW);
            }
        }
        log::debug!("🔓 Page scroll restored");
    }
}

/// Whether page scrolling is currently locked
pub fn is_locked(doc: &Document) -> bool {
    doc.style(doc.body()).get(OVERFLOW) == Some(LOCKED)
}
