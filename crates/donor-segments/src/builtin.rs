use donor_query::Operator;

use crate::rule::TriggerRule;
use crate::search::EntityType;

pub const AI_SEGMENT: &str = "ai-segment";

/// Dashboard cards and buttons shipped with the app.
pub fn builtin_rules() -> Vec<TriggerRule> {
    use EntityType::*;
    use Operator::*;

    vec![
        // ── Donor status ────────────────────────────────────────
        TriggerRule::new("donors-only", People, "Donors Only ({count})")
            .filter("donorStatus", Equals, "true"),
        TriggerRule::new("major-donors", People, "Major Donors >$1K ({count})")
            .filter("donorStatus", Equals, "true")
            .filter("totalGifts", Gte, "1000"),
        TriggerRule::new("lapsed-donors", People, "Lapsed Donors ({count})")
            .filter("donorStatus", Equals, "lapsed"),
        TriggerRule::new("recurring-donors", People, "Recurring Donors ({count})")
            .filter("isRecurring", Equals, "true"),
        TriggerRule::new("first-time-donors", People, "First-Time Donors ({count})")
            .filter("giftCount", Equals, "1"),
        TriggerRule::new(
            "giving-rate",
            People,
            "Donors ({percentage}% of {count} contacts)",
        )
        .filter("donorStatus", Equals, "true"),
        // ── Voters and party ────────────────────────────────────
        TriggerRule::new("active-voters", People, "Active Voters ({count})")
            .filter("voterStatus", Equals, "active"),
        TriggerRule::new("republicans", People, "Republicans ({count})")
            .filter("party", Equals, "Republican"),
        TriggerRule::new("democrats", People, "Democrats ({count})")
            .filter("party", Equals, "Democrat"),
        TriggerRule::new("independents", People, "Independents ({count})")
            .filter("party", Equals, "Independent"),
        // ── Data quality ────────────────────────────────────────
        TriggerRule::new("missing-contact", People, "Missing Contact Info ({count})")
            .filter("email", IsEmpty, "")
            .filter("phone", IsEmpty, ""),
        TriggerRule::new("missing-email", People, "Missing Email ({count})")
            .filter("email", IsEmpty, ""),
        TriggerRule::new("missing-phone", People, "Missing Phone ({count})")
            .filter("phone", IsEmpty, ""),
        // ── Parameterized by context ────────────────────────────
        TriggerRule::new("location-state", People, "{locationName} ({count})")
            .filter("state", Equals, "{locationName}"),
        TriggerRule::new("location-city", People, "{locationName} ({count})")
            .filter("city", Equals, "{locationName}"),
        TriggerRule::new("category-flag", People, "{category} ({count})")
            .filter("category", Equals, "{category}"),
        TriggerRule::new(AI_SEGMENT, People, "{segmentName} ({count})")
            .filter("segment", Equals, "{segmentName}"),
        // ── Other entity tables ─────────────────────────────────
        TriggerRule::new("large-gifts", Money, "Gifts ${amount}+ ({count})")
            .filter("giftAmount", Gte, "{amount}"),
        TriggerRule::new("pledges-outstanding", Pledges, "Outstanding Pledges ({count})")
            .filter("pledgeStatus", Equals, "outstanding")
            .filter("pledgeBalance", Gt, "0"),
        TriggerRule::new("upcoming-events", Events, "Upcoming Events ({count})")
            .filter("eventStatus", Equals, "upcoming"),
    ]
}
