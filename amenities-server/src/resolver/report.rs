//! Rendering sink for resolver results.

use crate::domain::Amenity;

/// Receives the outcome of a resolver run.
///
/// Exactly one of the two methods is called per run.
pub trait AmenityReporter {
    /// Render the final, ordered amenity list.
    fn render_amenities(&mut self, amenities: &[Amenity]);

    /// Render a user-facing error message.
    fn render_error(&mut self, message: &str);
}

/// Reporter that keeps what it was given, for callers that render later.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CollectedReport {
    #[default]
    Empty,
    Amenities(Vec<Amenity>),
    Error(String),
}

impl AmenityReporter for CollectedReport {
    fn render_amenities(&mut self, amenities: &[Amenity]) {
        *self = CollectedReport::Amenities(amenities.to_vec());
    }

    fn render_error(&mut self, message: &str) {
        *self = CollectedReport::Error(message.to_string());
    }
}
