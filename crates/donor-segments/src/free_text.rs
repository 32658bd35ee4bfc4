//! Keyword matching over free-text prompts.
//!
//! Each rule looks at the lowercased prompt on its own and contributes at
//! most one filter. There is no grammar: negation, word order and context
//! are ignored.

use std::sync::LazyLock;

use donor_query::{Filter, Operator, parse_number};
use regex::Regex;

const STATES: &[(&str, &str)] = &[
    ("alabama", "AL"),
    ("alaska", "AK"),
    ("arizona", "AZ"),
    ("arkansas", "AR"),
    ("california", "CA"),
    ("colorado", "CO"),
    ("connecticut", "CT"),
    ("delaware", "DE"),
    ("district of columbia", "DC"),
    ("florida", "FL"),
    ("georgia", "GA"),
    ("hawaii", "HI"),
    ("idaho", "ID"),
    ("illinois", "IL"),
    ("indiana", "IN"),
    ("iowa", "IA"),
    ("kansas", "KS"),
    ("kentucky", "KY"),
    ("louisiana", "LA"),
    ("maine", "ME"),
    ("maryland", "MD"),
    ("massachusetts", "MA"),
    ("michigan", "MI"),
    ("minnesota", "MN"),
    ("mississippi", "MS"),
    ("missouri", "MO"),
    ("montana", "MT"),
    ("nebraska", "NE"),
    ("nevada", "NV"),
    ("new hampshire", "NH"),
    ("new jersey", "NJ"),
    ("new mexico", "NM"),
    ("new york", "NY"),
    ("north carolina", "NC"),
    ("north dakota", "ND"),
    ("ohio", "OH"),
    ("oklahoma", "OK"),
    ("oregon", "OR"),
    ("pennsylvania", "PA"),
    ("rhode island", "RI"),
    ("south carolina", "SC"),
    ("south dakota", "SD"),
    ("tennessee", "TN"),
    ("texas", "TX"),
    ("utah", "UT"),
    ("vermont", "VT"),
    ("virginia", "VA"),
    ("washington", "WA"),
    ("west virginia", "WV"),
    ("wisconsin", "WI"),
    ("wyoming", "WY"),
];

static STATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Longest names first so "west virginia" wins over "virginia".
    let mut names: Vec<&str> = STATES.iter().map(|(name, _)| *name).collect();
    names.sort_by_key(|n| std::cmp::Reverse(n.len()));
    Regex::new(&format!(r"\b(?:{})\b", names.join("|"))).expect("state pattern is valid")
});

static BETWEEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"between\s+\$\s?(\d[\d,]*(?:\.\d+)?k?)\s+and\s+\$?\s?(\d[\d,]*(?:\.\d+)?k?)")
        .expect("between pattern is valid")
});

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\b(under|below|less than|at most)\s+)?\$\s?(\d[\d,]*(?:\.\d+)?k?)")
        .expect("amount pattern is valid")
});

static PARTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(republicans?|gop|democrats?|democratic|independents?)\b")
        .expect("party pattern is valid")
});

static GENDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(women|woman|females?|men|man|males?)\b").expect("gender pattern is valid")
});

static LAPSED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\blapsed\b").expect("lapsed pattern is valid"));

static VOLUNTEER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bvolunteers?\b").expect("volunteer pattern is valid"));

static RECURRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(recurring|monthly (?:donors?|givers?))\b").expect("recurring pattern is valid")
});

static NO_EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:no|without|missing)\s+emails?\b").expect("email pattern is valid")
});

static NO_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:no|without|missing)\s+phones?(?:\s+numbers?)?\b")
        .expect("phone pattern is valid")
});

type KeywordRule = fn(&str) -> Option<Filter>;

const RULES: &[KeywordRule] = &[
    state_rule,
    amount_rule,
    party_rule,
    gender_rule,
    lapsed_rule,
    volunteer_rule,
    recurring_rule,
    missing_email_rule,
    missing_phone_rule,
];

/// Filters suggested by keywords in `prompt`, one per rule that fires.
pub fn translate_free_text(prompt: &str) -> Vec<Filter> {
    let prompt = prompt.to_lowercase();
    RULES.iter().filter_map(|rule| rule(&prompt)).collect()
}

/// One distinct value becomes `equals`, several become `in`.
fn one_or_many(field: &str, mut values: Vec<&str>) -> Option<Filter> {
    let mut seen = Vec::with_capacity(values.len());
    values.retain(|v| {
        if seen.contains(v) {
            false
        } else {
            seen.push(*v);
            true
        }
    });
    match values.as_slice() {
        [] => None,
        [only] => Some(Filter::new(field, Operator::Equals, *only)),
        many => Some(Filter::new(field, Operator::In, many.join(","))),
    }
}

fn state_rule(prompt: &str) -> Option<Filter> {
    let codes = STATE_RE
        .find_iter(prompt)
        .filter_map(|m| {
            STATES
                .iter()
                .find(|(name, _)| *name == m.as_str())
                .map(|(_, code)| *code)
        })
        .collect();
    one_or_many("state", codes)
}

fn amount_rule(prompt: &str) -> Option<Filter> {
    if let Some(caps) = BETWEEN_RE.captures(prompt) {
        let lo = parse_amount(&caps[1])?;
        let hi = parse_amount(&caps[2])?;
        return Some(Filter::new(
            "giftAmount",
            Operator::Between,
            format!("{lo},{hi}"),
        ));
    }
    let caps = AMOUNT_RE.captures(prompt)?;
    let amount = parse_amount(&caps[2])?;
    let operator = match caps.get(1).map(|m| m.as_str()) {
        Some("at most") => Operator::Lte,
        Some(_) => Operator::Lt,
        None => Operator::Gte,
    };
    Some(Filter::new("giftAmount", operator, amount))
}

/// `"1,500"` → `"1500"`, `"2.5k"` → `"2500"`.
fn parse_amount(raw: &str) -> Option<String> {
    let (digits, scale) = match raw.strip_suffix('k') {
        Some(d) => (d, 1000.0),
        None => (raw, 1.0),
    };
    let n = parse_number(digits)? * scale;
    Some(if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    })
}

fn party_rule(prompt: &str) -> Option<Filter> {
    let parties = PARTY_RE
        .find_iter(prompt)
        .map(|m| match m.as_str() {
            "gop" | "republican" | "republicans" => "Republican",
            "independent" | "independents" => "Independent",
            _ => "Democrat",
        })
        .collect();
    one_or_many("party", parties)
}

fn gender_rule(prompt: &str) -> Option<Filter> {
    let genders = GENDER_RE
        .find_iter(prompt)
        .map(|m| match m.as_str() {
            "women" | "woman" | "female" | "females" => "F",
            _ => "M",
        })
        .collect();
    one_or_many("gender", genders)
}

fn lapsed_rule(prompt: &str) -> Option<Filter> {
    LAPSED_RE
        .is_match(prompt)
        .then(|| Filter::new("donorStatus", Operator::Equals, "lapsed"))
}

fn volunteer_rule(prompt: &str) -> Option<Filter> {
    VOLUNTEER_RE
        .is_match(prompt)
        .then(|| Filter::new("isVolunteer", Operator::Equals, "true"))
}

fn recurring_rule(prompt: &str) -> Option<Filter> {
    RECURRING_RE
        .is_match(prompt)
        .then(|| Filter::new("isRecurring", Operator::Equals, "true"))
}

fn missing_email_rule(prompt: &str) -> Option<Filter> {
    NO_EMAIL_RE
        .is_match(prompt)
        .then(|| Filter::new("email", Operator::IsEmpty, ""))
}

fn missing_phone_rule(prompt: &str) -> Option<Filter> {
    NO_PHONE_RE
        .is_match(prompt)
        .then(|| Filter::new("phone", Operator::IsEmpty, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(filters: &[Filter]) -> Vec<(String, Operator, String)> {
        let mut out: Vec<_> = filters
            .iter()
            .map(|f| (f.field().to_string(), f.operator(), f.value().to_string()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    #[test]
    fn texas_over_500() {
        let filters = translate_free_text("Find donors in Texas who gave over $500");
        assert_eq!(
            summary(&filters),
            vec![
                ("giftAmount".to_string(), Operator::Gte, "500".to_string()),
                ("state".to_string(), Operator::Equals, "TX".to_string()),
            ]
        );
    }

    #[test]
    fn nothing_matches_plain_text() {
        assert!(translate_free_text("show me everyone").is_empty());
    }

    #[test]
    fn women_does_not_also_match_men() {
        let filters = translate_free_text("Republican women in Ohio");
        assert_eq!(
            summary(&filters),
            vec![
                ("gender".to_string(), Operator::Equals, "F".to_string()),
                ("party".to_string(), Operator::Equals, "Republican".to_string()),
                ("state".to_string(), Operator::Equals, "OH".to_string()),
            ]
        );
    }

    #[test]
    fn state_names_respect_word_boundaries() {
        let filters = translate_free_text("donors in Arkansas and West Virginia");
        assert_eq!(
            summary(&filters),
            vec![("state".to_string(), Operator::In, "AR,WV".to_string())]
        );
    }

    #[test]
    fn amount_direction_and_units() {
        let f = &translate_free_text("gave under $1,000")[0];
        assert_eq!((f.operator(), f.value()), (Operator::Lt, "1000"));

        let f = &translate_free_text("gifts of $2.5k or more")[0];
        assert_eq!((f.operator(), f.value()), (Operator::Gte, "2500"));

        let f = &translate_free_text("at most $250")[0];
        assert_eq!((f.operator(), f.value()), (Operator::Lte, "250"));

        let f = &translate_free_text("gave between $100 and $500")[0];
        assert_eq!((f.operator(), f.value()), (Operator::Between, "100,500"));
    }

    #[test]
    fn status_keywords() {
        let filters = translate_free_text("lapsed volunteers with no email");
        assert_eq!(
            summary(&filters),
            vec![
                ("donorStatus".to_string(), Operator::Equals, "lapsed".to_string()),
                ("email".to_string(), Operator::IsEmpty, String::new()),
                ("isVolunteer".to_string(), Operator::Equals, "true".to_string()),
            ]
        );
    }

    #[test]
    fn negation_is_not_understood() {
        // Known limitation: "not" is ignored.
        let filters = translate_free_text("not democrats");
        assert_eq!(filters[0].value(), "Democrat");
    }
}
