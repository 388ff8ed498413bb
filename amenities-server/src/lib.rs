//! Nearby-amenities server.
//!
//! A web service that answers: "what is genuinely close to this property?"
//! It searches transit, hospitals, schools, banks and colleges around a
//! point, discards the noise that places searches return, and reports the
//! few amenities within walking or short driving distance.

pub mod cache;
pub mod domain;
pub mod geo;
pub mod google;
pub mod matcher;
pub mod resolver;
pub mod web;
