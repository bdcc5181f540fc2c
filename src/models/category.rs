//! Category metadata
//!
//! The dashboard ships a fixed set of spending categories with stable chart
//! colors. Category strings themselves are open: records may carry names
//! outside this set, and those get a deterministic color from the same
//! palette so charts stay stable across reloads and input orders.

/// The built-in spending categories, in form display order
pub const CATEGORIES: [&str; 8] = [
    "Food",
    "Bills",
    "Transport",
    "Shopping",
    "Entertainment",
    "Healthcare",
    "Education",
    "Other",
];

const CATEGORY_COLORS: [(&str, &str); 8] = [
    ("Food", "#ef4444"),
    ("Bills", "#f59e0b"),
    ("Transport", "#3b82f6"),
    ("Shopping", "#ec4899"),
    ("Entertainment", "#8b5cf6"),
    ("Healthcare", "#10b981"),
    ("Education", "#06b6d4"),
    ("Other", "#6b7280"),
];

/// Check whether a name is one of the built-in categories
pub fn is_known_category(name: &str) -> bool {
    CATEGORIES.contains(&name)
}

/// The chart color for a category
///
/// Built-in categories use their fixed color; anything else hashes to a
/// palette color by name, so the pick is a pure function of the string.
pub fn category_color(name: &str) -> &'static str {
    for (category, color) in CATEGORY_COLORS {
        if category == name {
            return color;
        }
    }
    let sum = name
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_add(b as usize));
    CATEGORY_COLORS[sum % CATEGORY_COLORS.len()].1
}
