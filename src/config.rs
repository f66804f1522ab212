use serde::Deserialize;

use crate::services::RankingConfig;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key (v3 auth)
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language passed to TMDB for localized titles and overviews
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Redis connection URL. Upstream responses are not cached when unset.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum fuzzy score (0.0 exact .. 1.0 anything) for a field to count as a match
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,

    #[serde(default = "default_title_weight")]
    pub title_weight: f64,

    #[serde(default = "default_original_title_weight")]
    pub original_title_weight: f64,

    #[serde(default = "default_overview_weight")]
    pub overview_weight: f64,

    /// Scores closer than this are ordered by popularity instead
    #[serde(default = "default_score_epsilon")]
    pub score_epsilon: f64,

    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_fuzzy_threshold() -> f64 {
    RankingConfig::default().threshold
}

fn default_title_weight() -> f64 {
    RankingConfig::default().title_weight
}

fn default_original_title_weight() -> f64 {
    RankingConfig::default().original_title_weight
}

fn default_overview_weight() -> f64 {
    RankingConfig::default().overview_weight
}

fn default_score_epsilon() -> f64 {
    RankingConfig::default().score_epsilon
}

fn default_max_results() -> usize {
    RankingConfig::default().max_results
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if !(0.0..=1.0).contains(&config.fuzzy_threshold) {
            anyhow::bail!(
                "FUZZY_THRESHOLD must be between 0 and 1, got {}",
                config.fuzzy_threshold
            );
        }
        if config.max_results == 0 {
            anyhow::bail!("MAX_RESULTS must be at least 1");
        }

        Ok(config)
    }

    /// Ranking parameters for the title searcher
    pub fn ranking(&self) -> RankingConfig {
        RankingConfig {
            threshold: self.fuzzy_threshold,
            title_weight: self.title_weight,
            original_title_weight: self.original_title_weight,
            overview_weight: self.overview_weight,
            score_epsilon: self.score_epsilon,
            max_results: self.max_results,
        }
    }
}
