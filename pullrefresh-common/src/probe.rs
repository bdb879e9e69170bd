//! Scroll-context probe
//!
//! Decides whether a gesture origin sits inside a nested scroll region that
//! is scrolled away from its own top, in which case the pull belongs to that
//! region and not to the page. The walk is written against [`ScrollNode`] so
//! the DOM host and the tests share the same logic.

/// Computed `overflow-y` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    Visible,
    Hidden,
    Clip,
    Auto,
    Scroll,
}

impl Overflow {
    /// Parse a computed CSS value; unknown values yield `None`
    pub fn from_css(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "visible" => Some(Self::Visible),
            "hidden" => Some(Self::Hidden),
            "clip" => Some(Self::Clip),
            // Legacy WebKit/Blink value, computed as `auto` there
            "auto" | "overlay" => Some(Self::Auto),
            "scroll" => Some(Self::Scroll),
            _ => None,
        }
    }

    pub fn is_scrollable(self) -> bool {
        matches!(self, Self::Auto | Self::Scroll)
    }
}

/// Node of a document-like tree
///
/// Lookups that can fail on a real document (detached nodes, missing
/// computed style) return `None`/`0.0`, which reads as "not scrollable".
pub trait ScrollNode: Sized {
    fn parent(&self) -> Option<Self>;

    /// Text and comment nodes are skipped by the walk
    fn is_element(&self) -> bool;

    fn is_same(&self, other: &Self) -> bool;

    fn overflow_y(&self) -> Option<Overflow>;

    fn scroll_top(&self) -> f64;
}

/// Read access to scroll positions around the container
pub trait ScrollProbe {
    type Target;

    /// Vertical scroll offset of the page itself
    fn page_scroll_top(&self) -> f64;

    /// See [`is_inner_scrollable`]
    fn is_inner_scrollable(&self, target: &Self::Target) -> bool;

    fn page_at_top(&self, tolerance: f64) -> bool {
        self.page_scroll_top() <= tolerance
    }
}

/// Walk from `target` up to (not including) `boundary`
///
/// Returns true at the first element whose `overflow-y` is `auto`/`scroll`
/// and whose scroll offset is above zero. The target itself is inspected.
/// A chain that never reaches `boundary` ends at the root and returns false.
pub fn is_inner_scrollable<N: ScrollNode>(target: &N, boundary: &N) -> bool {
    if target.is_same(boundary) {
        return false;
    }
    if is_scrolled_region(target) {
        return true;
    }

    let mut cursor = target.parent();
    while let Some(node) = cursor {
        if node.is_same(boundary) {
            return false;
        }
        if is_scrolled_region(&node) {
            return true;
        }
        cursor = node.parent();
    }

    false
}

fn is_scrolled_region<N: ScrollNode>(node: &N) -> bool {
    node.is_element()
        && node.overflow_y().is_some_and(Overflow::is_scrollable)
        && node.scroll_top() > 0.0
}
