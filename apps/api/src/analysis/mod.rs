// Resume analysis: entity extraction, similarity scoring, skill matching, suggestions.
// The pipeline wires them together; handlers expose it over HTTP.

pub mod entities;
pub mod handlers;
pub mod pipeline;
pub mod similarity;
pub mod skills;
pub mod suggestions;
