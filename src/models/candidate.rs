use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Discriminator shared by every candidate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Tv => write!(f, "tv"),
        }
    }
}

/// Fields common to movies and series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateDetails {
    pub id: u64,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub popularity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieCandidate {
    #[serde(flatten)]
    pub details: CandidateDetails,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesCandidate {
    #[serde(flatten)]
    pub details: CandidateDetails,
    pub name: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub first_air_date: Option<NaiveDate>,
}

/// A movie or series returned by the metadata search.
///
/// `(id, kind)` is the identity: TMDB reuses numeric ids across media kinds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum SearchCandidate {
    Movie(MovieCandidate),
    Tv(SeriesCandidate),
}

impl SearchCandidate {
    fn details(&self) -> &CandidateDetails {
        match self {
            SearchCandidate::Movie(movie) => &movie.details,
            SearchCandidate::Tv(series) => &series.details,
        }
    }

    pub fn id(&self) -> u64 {
        self.details().id
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            SearchCandidate::Movie(_) => MediaKind::Movie,
            SearchCandidate::Tv(_) => MediaKind::Tv,
        }
    }

    /// Deduplication key
    pub fn key(&self) -> (u64, MediaKind) {
        (self.id(), self.kind())
    }

    /// Movie title or series name
    pub fn display_name(&self) -> &str {
        match self {
            SearchCandidate::Movie(movie) => &movie.title,
            SearchCandidate::Tv(series) => &series.name,
        }
    }

    pub fn original_name(&self) -> Option<&str> {
        match self {
            SearchCandidate::Movie(movie) => movie.original_title.as_deref(),
            SearchCandidate::Tv(series) => series.original_name.as_deref(),
        }
    }

    pub fn overview(&self) -> Option<&str> {
        self.details().overview.as_deref()
    }

    pub fn popularity(&self) -> f64 {
        self.details().popularity
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        match self {
            SearchCandidate::Movie(movie) => movie.release_date,
            SearchCandidate::Tv(series) => series.first_air_date,
        }
    }
}

/// TMDB sends `""` for unknown dates; treat that and anything unparsable as absent.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_deserialization() {
        let json = r#"{
            "media_type": "movie",
            "id": 27205,
            "title": "Inception",
            "original_title": "Inception",
            "overview": "Cobb, a skilled thief who commits corporate espionage",
            "poster_path": "/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
            "release_date": "2010-07-15",
            "vote_average": 8.4,
            "popularity": 83.9
        }"#;

        let candidate: SearchCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.kind(), MediaKind::Movie);
        assert_eq!(candidate.id(), 27205);
        assert_eq!(candidate.display_name(), "Inception");
        assert_eq!(candidate.original_name(), Some("Inception"));
        assert_eq!(
            candidate.release_date(),
            NaiveDate::from_ymd_opt(2010, 7, 15)
        );
        assert_eq!(candidate.popularity(), 83.9);
    }

    #[test]
    fn test_series_deserialization_with_empty_date() {
        let json = r#"{
            "media_type": "tv",
            "id": 1396,
            "name": "Breaking Bad",
            "original_name": "Breaking Bad",
            "first_air_date": "",
            "popularity": 412.0
        }"#;

        let candidate: SearchCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.kind(), MediaKind::Tv);
        assert_eq!(candidate.display_name(), "Breaking Bad");
        assert_eq!(candidate.release_date(), None);
        assert_eq!(candidate.overview(), None);
    }

    #[test]
    fn test_missing_popularity_defaults_to_zero() {
        let json = r#"{"media_type": "movie", "id": 1, "title": "Obscure"}"#;
        let candidate: SearchCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.popularity(), 0.0);
    }

    #[test]
    fn test_person_record_rejected() {
        let json = r#"{"media_type": "person", "id": 287, "name": "Brad Pitt"}"#;
        assert!(serde_json::from_str::<SearchCandidate>(json).is_err());
    }

    #[test]
    fn test_same_id_different_kind_has_distinct_key() {
        let movie: SearchCandidate =
            serde_json::from_str(r#"{"media_type": "movie", "id": 42, "title": "Dune"}"#).unwrap();
        let series: SearchCandidate =
            serde_json::from_str(r#"{"media_type": "tv", "id": 42, "name": "Dune"}"#).unwrap();

        assert_ne!(movie.key(), series.key());
    }

    #[test]
    fn test_serialization_keeps_media_type_tag() {
        let candidate: SearchCandidate =
            serde_json::from_str(r#"{"media_type": "tv", "id": 7, "name": "Dark"}"#).unwrap();
        let value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(value["media_type"], "tv");
        assert_eq!(value["name"], "Dark");
        assert_eq!(value["id"], 7);
    }
}
