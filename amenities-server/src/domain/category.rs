//! Amenity categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kinds of amenity the resolver looks for around a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmenityKind {
    #[serde(rename = "train_station")]
    RailStation,
    SubwayStation,
    Hospital,
    School,
    Bank,
    University,
}

impl AmenityKind {
    /// All kinds, in dispatch order.
    pub const ALL: [AmenityKind; 6] = [
        AmenityKind::RailStation,
        AmenityKind::SubwayStation,
        AmenityKind::Hospital,
        AmenityKind::School,
        AmenityKind::Bank,
        AmenityKind::University,
    ];

    /// The place type understood by the places search API.
    pub fn wire_name(&self) -> &'static str {
        match self {
            AmenityKind::RailStation => "train_station",
            AmenityKind::SubwayStation => "subway_station",
            AmenityKind::Hospital => "hospital",
            AmenityKind::School => "school",
            AmenityKind::Bank => "bank",
            AmenityKind::University => "university",
        }
    }

    /// Parse a wire name back into a kind.
    pub fn from_wire_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.wire_name() == s)
    }

    /// Free-text query used to disambiguate this kind before a typed
    /// nearby search. Typed searches for these kinds return a lot of
    /// noise (ticket counters, pharmacies), text search ranks the real
    /// thing first.
    pub fn text_query(&self) -> Option<&'static str> {
        match self {
            AmenityKind::RailStation => Some("railway station"),
            AmenityKind::SubwayStation => Some("metro station"),
            AmenityKind::Hospital => Some("hospital"),
            _ => None,
        }
    }

    /// Whether candidates are ranked by rating and popularity rather than
    /// proximity alone.
    pub fn is_quality_ranked(&self) -> bool {
        matches!(self, AmenityKind::School | AmenityKind::University)
    }

    /// The static category entry for this kind.
    pub fn category(&self) -> &'static AmenityCategory {
        // CATEGORIES is indexed in ALL order
        &CATEGORIES[*self as usize]
    }
}

impl fmt::Display for AmenityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Display metadata for one amenity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmenityCategory {
    pub kind: AmenityKind,
    pub icon: &'static str,
    pub display_name: &'static str,
}

/// The fixed category table.
pub const CATEGORIES: [AmenityCategory; 6] = [
    AmenityCategory {
        kind: AmenityKind::RailStation,
        icon: "🚉",
        display_name: "Railway Station",
    },
    AmenityCategory {
        kind: AmenityKind::SubwayStation,
        icon: "🚇",
        display_name: "Metro Station",
    },
    AmenityCategory {
        kind: AmenityKind::Hospital,
        icon: "🏥",
        display_name: "Hospital",
    },
    AmenityCategory {
        kind: AmenityKind::School,
        icon: "🏫",
        display_name: "School",
    },
    AmenityCategory {
        kind: AmenityKind::Bank,
        icon: "🏦",
        display_name: "Bank",
    },
    AmenityCategory {
        kind: AmenityKind::University,
        icon: "🎓",
        display_name: "College",
    },
];
