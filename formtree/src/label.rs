//! Humanization of camel-case field identifiers.

/// Turns a camel-case identifier into a display label.
///
/// A space is inserted before every ASCII uppercase letter after the first
/// character, then the first character is uppercased:
///
/// ```rust
/// assert_eq!(formtree::humanize("businessName"), "Business Name");
/// assert_eq!(formtree::humanize("sameMenuForAll"), "Same Menu For All");
/// ```
pub fn humanize(identifier: &str) -> String {
    let mut label = String::with_capacity(identifier.len() + 4);
    for (index, ch) in identifier.chars().enumerate() {
        if index > 0 && ch.is_ascii_uppercase() {
            label.push(' ');
        }
        if index == 0 {
            label.extend(ch.to_uppercase());
        } else {
            label.push(ch);
        }
    }
    label
}
