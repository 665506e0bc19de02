//! Human-readable strings for preview fields

use byte_unit::{Byte, UnitType};
use chrono::{DateTime, Local};

const KIB: u64 = 1024;

/// Format a byte count for display
///
/// Sizes of 1 KiB and above use the largest fitting binary unit with two
/// decimals. With `show_total_bytes`, the exact count follows in
/// parentheses, e.g. `2.00 KiB (2,048 bytes)`.
#[must_use]
pub fn bytes_to_readable(bytes: u64, show_total_bytes: bool) -> String {
    if bytes < KIB {
        return format!("{} bytes", group_digits(bytes));
    }

    let adjusted = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Binary);
    if show_total_bytes {
        format!("{adjusted:.2} ({} bytes)", group_digits(bytes))
    } else {
        format!("{adjusted:.2}")
    }
}

/// Format a modification time for display
#[must_use]
pub fn format_modified(modified: &DateTime<Local>) -> String {
    modified.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Insert `,` between groups of three digits
fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}
