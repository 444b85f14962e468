//! Generic tree-search utilities over parsed HTML
//!
//! Pure functions over `scraper` element trees, no I/O. Class matching is
//! class-list membership, so `class="item active"` matches both `item`
//! and `active`.

use scraper::ElementRef;

/// Returns true if the element's class list contains `class`
fn has_class(element: &ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Finds a node by class via depth-first traversal
///
/// Returns the **last** matching node in traversal order, not the first.
/// Callers that care about which of several matches wins must account for
/// this tie-break.
pub fn find_by_class<'a>(root: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    let mut found = None;
    for node in root.descendants() {
        if let Some(element) = ElementRef::wrap(node) {
            if has_class(&element, class) {
                found = Some(element);
            }
        }
    }
    found
}

/// Concatenates all descendant text content in document order
///
/// No trimming is applied; padding and entity-decoded characters (including
/// non-breaking spaces) survive intact for the caller to police.
pub fn extract_text(node: ElementRef) -> String {
    node.text().collect()
}

/// Collects, per direct child of `root`, the first descendant with `class`
///
/// Children whose subtree has no match are skipped. This yields one node per
/// card container rather than every match globally, which keeps nested
/// matches from producing duplicate cards.
pub fn children_with_class<'a>(root: ElementRef<'a>, class: &str) -> Vec<ElementRef<'a>> {
    root.children()
        .filter_map(|child| {
            child
                .descendants()
                .filter_map(ElementRef::wrap)
                .find(|element| has_class(element, class))
        })
        .collect()
}
