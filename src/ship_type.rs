//! Ship-type code lookup.
//!
//! AIS ship-type codes resolve in three tiers: named codes first, then the
//! container special case, then closed code bands.

use std::ops::RangeInclusive;

pub const UNKNOWN_SHIP_TYPE: &str = "Unknown type";

const NAMED_TYPES: &[(i64, &str)] = &[
    (30, "Fishing"),
    (31, "Towing"),
    (32, "Towing (length > 200m or breadth > 25m)"),
    (33, "Dredging or underwater operations"),
    (34, "Diving operations"),
    (35, "Military operations"),
    (36, "Sailing"),
    (37, "Pleasure craft"),
    (50, "Pilot vessel"),
    (51, "Search and rescue vessel"),
    (52, "Tug"),
    (53, "Port tender"),
    (54, "Anti-pollution vessel"),
    (55, "Law enforcement vessel"),
    (56, "Spare - local vessel"),
    (57, "Spare - local vessel"),
    (58, "Medical transport"),
    (59, "Resolution No. 18 vessel"),
];

const SPECIAL_TYPES: &[(i64, &str)] = &[(100, "Container ship")];

/// Bands must stay disjoint
const TYPE_RANGES: &[(RangeInclusive<i64>, &str)] = &[
    (20..=29, "Wing in ground craft"),
    (40..=49, "High-speed craft"),
    (60..=69, "Passenger ship"),
    (70..=79, "Cargo ship"),
    (80..=89, "Tanker"),
    (90..=99, "Other type of ship"),
];

/// Resolve a numeric ship-type code to a category label
pub fn ship_type_name(code: i64) -> &'static str {
    let lookup = |table: &[(i64, &'static str)]| {
        table
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
    };

    lookup(NAMED_TYPES)
        .or_else(|| lookup(SPECIAL_TYPES))
        .or_else(|| {
            TYPE_RANGES
                .iter()
                .find(|(range, _)| range.contains(&code))
                .map(|(_, name)| *name)
        })
        .unwrap_or(UNKNOWN_SHIP_TYPE)
}
