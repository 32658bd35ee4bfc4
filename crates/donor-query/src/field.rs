/// Known record fields and their display labels.
///
/// Field keys not listed here label as themselves.
pub const FIELD_LABELS: &[(&str, &str)] = &[
    ("donorStatus", "Donor Status"),
    ("totalGifts", "Total Gifts"),
    ("giftAmount", "Gift Amount"),
    ("lastGiftDate", "Last Gift Date"),
    ("firstGiftDate", "First Gift Date"),
    ("giftCount", "Gift Count"),
    ("isRecurring", "Recurring Donor"),
    ("isVolunteer", "Volunteer"),
    ("voterStatus", "Voter Status"),
    ("party", "Party"),
    ("gender", "Gender"),
    ("state", "State"),
    ("city", "City"),
    ("zip", "ZIP Code"),
    ("email", "Email"),
    ("phone", "Phone"),
    ("category", "Category"),
    ("segment", "Segment"),
    ("pledgeStatus", "Pledge Status"),
    ("pledgeBalance", "Pledge Balance"),
    ("eventDate", "Event Date"),
    ("eventStatus", "Event Status"),
    ("amount", "Amount"),
    ("name", "Name"),
];

/// Display label for a field key.
pub fn field_label(field: &str) -> &str {
    FIELD_LABELS
        .iter()
        .find(|(key, _)| *key == field)
        .map(|(_, label)| *label)
        .unwrap_or(field)
}

pub fn is_known_field(field: &str) -> bool {
    FIELD_LABELS.iter().any(|(key, _)| *key == field)
}
