//! services/cli/src/ui.rs
//!
//! Terminal rendering helpers for the quote card and the countdown.

use crate::state::QuoteView;
use chrono::Duration;

/// Prints the quote with its attribution, if any.
pub fn render_quote(quote: &QuoteView) {
    println!();
    println!("  \"{}\"", quote.text);
    if let Some(author) = &quote.author {
        println!("      -- {}", author);
    }
    println!();
}

/// Formats the time remaining until the next quote, e.g. `3h 12m 9s`.
/// Negative durations clamp to zero.
pub fn format_countdown(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{}h {}m {}s", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        let remaining = Duration::hours(23) + Duration::minutes(5) + Duration::seconds(42);
        assert_eq!(format_countdown(remaining), "23h 5m 42s");
    }

    #[test]
    fn formats_sub_minute_durations() {
        assert_eq!(format_countdown(Duration::seconds(9)), "0h 0m 9s");
    }

    #[test]
    fn negative_durations_clamp_to_zero() {
        assert_eq!(format_countdown(Duration::seconds(-30)), "0h 0m 0s");
    }
}
