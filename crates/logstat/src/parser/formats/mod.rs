/// Individual log format parsers

pub mod simple;
pub mod combined;

// Re-export parser implementations
pub use simple::SimpleParser;
pub use combined::CombinedParser;

/// Whether `field` has exactly the shape of `layout`.
///
/// In the layout `9` is an ASCII digit, `A` an ASCII letter and `s` a
/// `+`/`-` sign; every other byte must match literally.
pub(crate) fn matches_layout(field: &str, layout: &str) -> bool {
    field.len() == layout.len()
        && field.bytes().zip(layout.bytes()).all(|(c, l)| match l {
            b'9' => c.is_ascii_digit(),
            b'A' => c.is_ascii_alphabetic(),
            b's' => c == b'+' || c == b'-',
            _ => c == l,
        })
}
