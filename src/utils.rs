use std::str::{self, FromStr};

/// Strip one balanced pair of `quote` bytes from both ends of `cell`.
///
/// Returns `None` when the cell is not quoted, so callers can fall back to
/// the verbatim bytes. Doubled quotes inside the cell are not unescaped.
#[inline]
pub fn unquoted(cell: &[u8], quote: u8) -> Option<&[u8]> {
    let len = cell.len();

    if len >= 2 && cell[0] == quote && cell[len - 1] == quote {
        Some(&cell[1..len - 1])
    } else {
        None
    }
}

/// Convert a field's bytes into a number.
///
/// Returns `None` when the bytes are not valid UTF-8 or do not parse as
/// `T`. Works for any `FromStr` type, typically integers and floats.
#[inline]
pub fn parse_number<T: FromStr>(cell: &[u8]) -> Option<T> {
    str::from_utf8(cell).ok()?.parse().ok()
}
