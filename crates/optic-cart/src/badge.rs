//! Counter badge text

/// Badge text for a cart holding `total` units
///
/// `"{label} ({total})"` when non-empty, the bare label otherwise.
#[must_use]
pub fn badge_text(label: &str, total: u64) -> String {
    if total > 0 {
        format!("{label} ({total})")
    } else {
        label.to_string()
    }
}
