//! Key naming for derived fields.

/// Converts a snake-case field name to the camel-case key used by stored records.
///
/// Leading underscores are kept; every other underscore is dropped and the
/// following character uppercased. Raw identifiers lose their `r#` prefix.
pub(crate) fn camel_case(ident: &str) -> String {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    let trimmed = ident.trim_start_matches('_');
    let mut key = String::with_capacity(ident.len());
    key.push_str(&ident[..ident.len() - trimmed.len()]);
    let mut upper_next = false;
    for ch in trimmed.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            key.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            key.push(ch);
        }
    }
    key
}
