//! Record identity: `(tag, name)` with the name compared case-insensitively

/// Lookup key of a record
///
/// The name is stored folded, so the derived `Eq` and `Hash` agree: keys
/// that compare equal always hash identically.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordKey {
    tag: u32,
    folded_name: String,
}

impl RecordKey {
    pub fn new(tag: u32, name: &str) -> Self {
        Self {
            tag,
            folded_name: fold_name(name),
        }
    }
}

/// Ordinal case fold: each char maps to its single-char uppercase form.
///
/// Chars whose uppercase expands to several chars (e.g. 'ß') are kept as-is,
/// so the fold never changes the char count.
pub fn fold_name(name: &str) -> String {
    name.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}
