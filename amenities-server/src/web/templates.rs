//! Askama templates for the amenities fragment.

use askama::Template;

use crate::domain::{Amenity, DurationSource, TravelTime};
use crate::resolver::AmenityReporter;

// ============================================================================
// Fragment Templates (AJAX responses)
// ============================================================================

/// Amenity card list.
#[derive(Template)]
#[template(path = "amenity_list.html")]
pub struct AmenityListTemplate {
    pub amenities: Vec<AmenityView>,
}

/// Message shown in place of the list.
#[derive(Template)]
#[template(path = "amenity_error.html")]
pub struct AmenityErrorTemplate {
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Amenity view model for templates.
///
/// Legs without a usable duration are `None` and not rendered.
#[derive(Debug, Clone)]
pub struct AmenityView {
    pub name: String,
    pub kind: &'static str,
    pub icon: &'static str,
    pub category_name: &'static str,
    pub walking: Option<String>,
    pub walking_estimated: bool,
    pub driving: Option<String>,
}

impl AmenityView {
    /// Create from a resolved amenity.
    pub fn from_amenity(amenity: &Amenity) -> Self {
        let shown = |time: &TravelTime| match time {
            TravelTime::Available(d) => Some(d.text.clone()),
            TravelTime::Pending | TravelTime::NotAvailable => None,
        };

        Self {
            name: amenity.name.clone(),
            kind: amenity.kind.wire_name(),
            icon: amenity.icon,
            category_name: amenity.category_name,
            walking: shown(amenity.walking()),
            walking_estimated: matches!(
                amenity.walking(),
                TravelTime::Available(d) if d.source == DurationSource::Estimated
            ),
            driving: shown(amenity.driving()),
        }
    }
}

/// Reporter that renders the HTML fragment.
#[derive(Debug, Default)]
pub struct HtmlReport {
    output: Option<askama::Result<String>>,
}

impl HtmlReport {
    /// The rendered fragment. Empty if nothing was reported.
    pub fn finish(self) -> askama::Result<String> {
        self.output.unwrap_or_else(|| Ok(String::new()))
    }
}

impl AmenityReporter for HtmlReport {
    fn render_amenities(&mut self, amenities: &[Amenity]) {
        let template = AmenityListTemplate {
            amenities: amenities.iter().map(AmenityView::from_amenity).collect(),
        };
        self.output = Some(template.render());
    }

    fn render_error(&mut self, message: &str) {
        let template = AmenityErrorTemplate {
            message: message.to_string(),
        };
        self.output = Some(template.render());
    }
}
