//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Format a byte count with thousands separators and a `B` unit
///
/// Sizes are always printed in bytes so that two reports can be compared
/// digit by digit.
///
/// # Examples
///
/// ```
/// use size_snapshot::fmt::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(11_138), "11,138 B");
/// assert_eq!(format_size(1_048_576), "1,048,576 B");
/// ```
pub fn format_size(bytes: u64) -> String {
    format!("{} B", group_thousands(bytes))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_various_sizes() {
        assert_eq!(format_size(1), "1 B");
        assert_eq!(format_size(999), "999 B");
        assert_eq!(format_size(1_000), "1,000 B");
        assert_eq!(format_size(5_474), "5,474 B");
        assert_eq!(format_size(123_456_789), "123,456,789 B");
    }

    #[test]
    fn test_format_size_at_group_boundaries() {
        assert_eq!(format_size(100_000), "100,000 B");
        assert_eq!(format_size(1_000_000), "1,000,000 B");
        assert_eq!(format_size(u64::MAX), "18,446,744,073,709,551,615 B");
    }
}
