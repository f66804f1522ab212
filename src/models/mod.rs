pub mod candidate;
pub mod search;

pub use candidate::{CandidateDetails, MediaKind, MovieCandidate, SearchCandidate, SeriesCandidate};
pub use search::{SearchPage, SearchResponse};
