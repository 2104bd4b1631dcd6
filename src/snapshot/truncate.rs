/// Which end of an over-long string survives truncation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TruncateStyle {
    /// Keep the head, append the marker.
    End,
    /// Keep the tail, prepend the marker.
    Start,
}

pub const ANNOUNCED_ADDRESS_MARKER: &str = "-";
pub const ANNOUNCED_ADDRESS_LIMIT: usize = 25;

/// Bound `value` to `limit` characters plus the marker.
///
/// A missing value renders as the marker alone. Lengths are counted in chars,
/// so cuts never split a code point.
pub fn truncate(value: Option<&str>, marker: &str, limit: usize, style: TruncateStyle) -> String {
    let Some(s) = value else {
        return marker.to_owned();
    };
    let len = s.chars().count();
    if len <= limit {
        return s.to_owned();
    }
    match style {
        TruncateStyle::End => {
            let cut = s.char_indices().nth(limit).map(|(i, _)| i).unwrap_or(s.len());
            let mut out = String::with_capacity(cut + marker.len());
            out.push_str(&s[..cut]);
            out.push_str(marker);
            out
        }
        TruncateStyle::Start => {
            let cut = s.char_indices().nth(len - limit).map(|(i, _)| i).unwrap_or(0);
            let mut out = String::with_capacity(s.len() - cut + marker.len());
            out.push_str(marker);
            out.push_str(&s[cut..]);
            out
        }
    }
}

/// Announced addresses as the dashboard shows them.
pub fn announced_address(value: Option<&str>) -> String {
    truncate(value, ANNOUNCED_ADDRESS_MARKER, ANNOUNCED_ADDRESS_LIMIT, TruncateStyle::End)
}
