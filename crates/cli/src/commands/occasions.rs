//! Upcoming occasions for merchandising.

use bluepenguin_core::occasion;
use chrono::Local;

use super::emit;

/// Print the next `limit` occasions from today.
pub fn list(limit: usize) {
    let today = Local::now().date_naive();
    let upcoming = occasion::upcoming(today, limit);

    if upcoming.is_empty() {
        emit("No upcoming occasions");
        return;
    }
    for occasion in upcoming {
        emit(format_args!(
            "{}  {:<28} {}",
            occasion.date.format("%a %d %b %Y"),
            occasion.name,
            occasion.kind
        ));
    }
}
