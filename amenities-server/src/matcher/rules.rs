//! Per-category name rules.
//!
//! Every predicate receives a trimmed, lowercased name.

use crate::domain::AmenityKind;

/// A name test over a normalized (trimmed, lowercase) place name.
pub type NamePredicate = fn(&str) -> bool;

/// Name rules for one category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub kind: AmenityKind,
    /// Applied first.
    pub strict: NamePredicate,
    /// Applied to the full input only when `strict` keeps nothing.
    pub relaxed: Option<NamePredicate>,
}

/// The rule table, in `AmenityKind::ALL` order.
const RULES: [CategoryRule; 6] = [
    CategoryRule {
        kind: AmenityKind::RailStation,
        strict: rail_station,
        relaxed: Some(rail_station_relaxed),
    },
    CategoryRule {
        kind: AmenityKind::SubwayStation,
        strict: subway_station,
        relaxed: Some(subway_station_relaxed),
    },
    CategoryRule {
        kind: AmenityKind::Hospital,
        strict: hospital,
        relaxed: Some(hospital_relaxed),
    },
    CategoryRule {
        kind: AmenityKind::School,
        strict: school,
        relaxed: None,
    },
    CategoryRule {
        kind: AmenityKind::Bank,
        strict: bank,
        relaxed: None,
    },
    CategoryRule {
        kind: AmenityKind::University,
        strict: university,
        relaxed: None,
    },
];

/// Look up the rule for a category.
pub fn rule_for(kind: AmenityKind) -> &'static CategoryRule {
    &RULES[kind as usize]
}

const NON_HOSPITAL_TERMS: &[&str] = &[
    "nursing home",
    "pharmacy",
    "clinic",
    "medical store",
    "medical hall",
    "medical shop",
    "diagnostic",
    "lab",
    "laboratory",
    "imaging",
    "pathology",
    "medical center",
    "health center",
];

const NON_STATION_TERMS: &[&str] = &["watch", "shop", "store", "restaurant", "hotel", "mall", "market"];

const NON_STATION_TERMS_RELAXED: &[&str] = &["watch", "shop", "store"];

const NON_EDUCATIONAL_TERMS: &[&str] = &[
    "driving school",
    "motor training",
    "coaching center",
    "tuition center",
    "tutorial center",
    "open school",
    "distance learning",
    "correspondence",
    "pre-school",
    "preschool",
    "pre school",
    "play school",
    "playschool",
    "kindergarten",
    "nursery",
    "junior",
];

const NON_UNIVERSITY_TERMS: &[&str] = &["driving school", "motor training", "training school", "coaching"];

fn contains_any(name: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| name.contains(t))
}

fn hospital(n: &str) -> bool {
    let non_hospital =
        contains_any(n, NON_HOSPITAL_TERMS) || (n.contains("medical") && !n.contains("hospital"));
    !non_hospital && n.contains("hospital")
}

fn hospital_relaxed(n: &str) -> bool {
    n.contains("hospital") && !n.contains("medical store") && !n.contains("medical hall")
}

fn rail_station(n: &str) -> bool {
    let cabin = n.contains("cabin") && !n.contains("station") && !n.contains("railway");
    !cabin && contains_any(n, &["station", "railway", "junction"])
}

fn rail_station_relaxed(n: &str) -> bool {
    n.contains("railway") || n.contains("junction")
}

fn subway_station(n: &str) -> bool {
    let transit_word = n.contains("station") || n.contains("metro") || n.contains("subway");
    let cabin = n.contains("cabin") && !transit_word;
    let platform = n.contains("platform") && !transit_word;
    let gate = n.contains("gate") && !n.contains("station");

    if cabin || platform || gate || contains_any(n, NON_STATION_TERMS) {
        return false;
    }

    let rail_like = n.contains("station") || n.contains("rail");
    n.contains("station") || ((n.contains("metro") || n.contains("subway")) && rail_like)
}

fn subway_station_relaxed(n: &str) -> bool {
    (n.contains("metro") || n.contains("subway"))
        && !n.contains("gate")
        && !contains_any(n, NON_STATION_TERMS_RELAXED)
        && (n.contains("station") || n.contains("rail"))
}

fn bank(n: &str) -> bool {
    // CSP: customer service points, agent counters rather than branches
    !n.contains("csp")
}

fn school(n: &str) -> bool {
    let non_educational = contains_any(n, NON_EDUCATIONAL_TERMS)
        || (n.contains("training school") && !n.contains("high school"));
    !non_educational && (n.contains("school") || n.contains("education"))
}

fn university(n: &str) -> bool {
    !contains_any(n, NON_UNIVERSITY_TERMS)
        && contains_any(n, &["college", "university", "institute"])
}
