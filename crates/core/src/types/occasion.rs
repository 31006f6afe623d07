//! Calendar of festivals and holidays shown on the admin dashboard.
//!
//! Campaign planning keys off these dates, so the list is curated by hand
//! for the current trading year.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default number of upcoming occasions shown.
pub const DEFAULT_UPCOMING_LIMIT: usize = 2;

/// Kind of occasion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccasionKind {
    Festival,
    PublicHoliday,
    SpecialDay,
}

impl std::fmt::Display for OccasionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Festival => write!(f, "Festival"),
            Self::PublicHoliday => write!(f, "Public Holiday"),
            Self::SpecialDay => write!(f, "Special Day"),
        }
    }
}

/// A dated occasion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occasion {
    pub name: String,
    pub date: NaiveDate,
    pub kind: OccasionKind,
}

const CALENDAR: &[(&str, (i32, u32, u32), OccasionKind)] = &[
    ("Mannam Jayanti", (2026, 1, 2), OccasionKind::PublicHoliday),
    ("Republic Day", (2026, 1, 26), OccasionKind::PublicHoliday),
    ("Maha Shivaratri", (2026, 2, 15), OccasionKind::Festival),
    ("Eid-ul-Fitr (Ramzan)", (2026, 3, 20), OccasionKind::Festival),
    ("Maundy Thursday", (2026, 4, 2), OccasionKind::SpecialDay),
    ("Good Friday", (2026, 4, 3), OccasionKind::PublicHoliday),
    ("Vishu", (2026, 4, 15), OccasionKind::Festival),
    ("May Day", (2026, 5, 1), OccasionKind::PublicHoliday),
    ("Bakrid (Eid-ul-Adha)", (2026, 5, 27), OccasionKind::Festival),
    ("Muharram", (2026, 6, 25), OccasionKind::Festival),
    ("Independence Day", (2026, 8, 15), OccasionKind::PublicHoliday),
    ("Thiruvonam (Onam)", (2026, 8, 26), OccasionKind::Festival),
    ("Sree Narayana Guru Samadhi", (2026, 9, 21), OccasionKind::PublicHoliday),
    ("Gandhi Jayanthi", (2026, 10, 2), OccasionKind::PublicHoliday),
    ("Deepavali", (2026, 11, 8), OccasionKind::Festival),
    ("Christmas", (2026, 12, 25), OccasionKind::Festival),
];

/// The full occasion calendar.
#[must_use]
pub fn calendar() -> Vec<Occasion> {
    CALENDAR
        .iter()
        .filter_map(|&(name, (y, m, d), kind)| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| Occasion {
                name: name.to_string(),
                date,
                kind,
            })
        })
        .collect()
}

/// Occasions on or after `today`, soonest first, at most `limit` of them.
#[must_use]
pub fn upcoming(today: NaiveDate, limit: usize) -> Vec<Occasion> {
    let mut occasions: Vec<Occasion> = calendar()
        .into_iter()
        .filter(|o| o.date >= today)
        .collect();
    occasions.sort_by_key(|o| o.date);
    occasions.truncate(limit);
    occasions
}
