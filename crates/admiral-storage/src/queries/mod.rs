//! Per-table query functions. Every function takes a `&Connection` so the
//! same code runs on the writer, a pooled reader, or inside a transaction.

pub mod child_groups;
pub mod groups;
pub mod host_groups;
pub mod hosts;

/// Build a LIKE pattern matching `needle` anywhere, escaping LIKE wildcards.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
