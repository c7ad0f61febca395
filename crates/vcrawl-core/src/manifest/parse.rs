//! First-field extraction from one CSV record line.

/// Returns the first field of a CSV line, or `None` for a line with no
/// fields at all (an empty line).
///
/// Quoting follows RFC 4180: a field starting with `"` runs to the
/// closing quote, `""` inside is a literal quote, and commas inside
/// quotes do not split. Everything after the first field is ignored.
/// The field is returned unmodified: no trimming, no case change.
pub(crate) fn first_field(line: &str) -> Option<String> {
    if line.is_empty() {
        return None;
    }

    let mut chars = line.chars();
    if line.starts_with('"') {
        chars.next();
        let mut field = String::new();
        while let Some(c) = chars.next() {
            if c != '"' {
                field.push(c);
                continue;
            }
            match chars.next() {
                // Doubled quote: literal quote, field continues.
                Some('"') => field.push('"'),
                // Closing quote; anything up to the next comma is ignored.
                _ => break,
            }
        }
        return Some(field);
    }

    match line.split_once(',') {
        Some((first, _)) => Some(first.to_string()),
        None => Some(line.to_string()),
    }
}
