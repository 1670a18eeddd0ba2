// Site configuration.
// Static site identity plus the tunables for commit fetching and the analytics footer.

use std::time::Duration;

use serde::Serialize;

use crate::error::{Result, SiteError};

/// Cache key holding the latest commit snapshot.
pub const COMMITS_CACHE_KEY: &str = "github:commits";

/// Default freshness window for cached commits: 1 hour.
pub const DEFAULT_COMMITS_TTL: Duration = Duration::from_secs(60 * 60);

/// Upper bound on a single events feed request.
pub const DEFAULT_COMMITS_TIMEOUT: Duration = Duration::from_millis(1200);

/// Upper bound on a single analytics counter request.
pub const DEFAULT_FOOTER_TIMEOUT: Duration = Duration::from_millis(600);

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_WEB_BASE: &str = "https://github.com";
const GITHUB_USERNAME: &str = "teamial";
const USER_AGENT: &str = "nyx-website/1.0";

/// Settings for the commit activity fetcher.
#[derive(Debug, Clone)]
pub struct CommitsConfig {
    /// GitHub login whose public events are read.
    pub username: String,
    /// REST API base URL.
    pub api_base: String,
    /// Web base URL used to build commit links.
    pub web_base: String,
    /// Age after which a cached snapshot is revalidated.
    pub ttl: Duration,
    /// Timeout for the events request.
    pub timeout: Duration,
    /// Client identifier sent as the User-Agent header.
    pub user_agent: String,
    /// Store key for the snapshot.
    pub cache_key: String,
}

impl Default for CommitsConfig {
    fn default() -> Self {
        Self {
            username: GITHUB_USERNAME.to_string(),
            api_base: GITHUB_API_BASE.to_string(),
            web_base: GITHUB_WEB_BASE.to_string(),
            ttl: DEFAULT_COMMITS_TTL,
            timeout: DEFAULT_COMMITS_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
            cache_key: COMMITS_CACHE_KEY.to_string(),
        }
    }
}

impl CommitsConfig {
    /// Set the TTL from a millisecond count.
    pub fn with_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.ttl = Duration::from_millis(ttl_ms);
        self
    }

    /// Point the fetcher at a different API host.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Build from defaults overridden by `NYX_GITHUB_USERNAME`, `NYX_GITHUB_API`
    /// and `NYX_COMMITS_TTL_MS`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(username) = std::env::var("NYX_GITHUB_USERNAME") {
            config.username = username;
        }
        if let Ok(api_base) = std::env::var("NYX_GITHUB_API") {
            config.api_base = api_base;
        }
        if let Ok(ttl) = std::env::var("NYX_COMMITS_TTL_MS") {
            config = config.with_ttl_ms(parse_millis("NYX_COMMITS_TTL_MS", &ttl)?);
        }

        Ok(config)
    }
}

/// Settings for the page-view counter shown in the footer.
#[derive(Debug, Clone, Serialize)]
pub struct FooterConfig {
    pub instance: String,
    pub namespace: String,
    pub key: String,
    #[serde(skip)]
    pub timeout: Duration,
}

impl Default for FooterConfig {
    fn default() -> Self {
        // Counter is disabled until all three fields are set.
        Self {
            instance: String::new(),
            namespace: String::new(),
            key: String::new(),
            timeout: DEFAULT_FOOTER_TIMEOUT,
        }
    }
}

impl FooterConfig {
    /// Build from defaults overridden by `NYX_ABACUS_INSTANCE`, `NYX_ABACUS_NAMESPACE`
    /// and `NYX_ABACUS_KEY`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(instance) = std::env::var("NYX_ABACUS_INSTANCE") {
            config.instance = instance;
        }
        if let Ok(namespace) = std::env::var("NYX_ABACUS_NAMESPACE") {
            config.namespace = namespace;
        }
        if let Ok(key) = std::env::var("NYX_ABACUS_KEY") {
            config.key = key;
        }
        config
    }

    /// Whether every field needed to hit the counter is present.
    pub fn is_enabled(&self) -> bool {
        !self.instance.is_empty() && !self.namespace.is_empty() && !self.key.is_empty()
    }

    /// Counter hit URL, if the counter is configured.
    pub fn hit_url(&self) -> Option<String> {
        self.is_enabled().then(|| {
            format!(
                "{}/hit/{}/{}",
                self.instance.trim_end_matches('/'),
                self.namespace,
                self.key
            )
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub region: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Employer {
    pub name: String,
    pub url: String,
}

/// Structured-data fields used for SEO metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub works_for: Option<Employer>,
    pub location: Location,
}

/// Outbound profile links.
#[derive(Debug, Clone, Serialize)]
pub struct OutLinks {
    pub github: String,
    pub linkedin: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calcom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wakatime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bluesky: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoLinks {
    pub url: String,
    pub commit_base_url: String,
}

/// Site identity shared by every page.
#[derive(Debug, Clone, Serialize)]
pub struct SiteConfig {
    pub name: String,
    pub url: String,
    pub description: String,
    pub tags: Vec<String>,
    pub seo: Seo,
    pub abacus: FooterConfig,
    pub out: OutLinks,
    pub repo: RepoLinks,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let url = if cfg!(debug_assertions) {
            "http://localhost:5173"
        } else {
            "https://example.com"
        };

        Self {
            name: "Teanna Cole".to_string(),
            url: url.to_string(),
            description: "Teanna Cole, Computer Science student in New York, NY, focused on \
                          software engineering and machine learning."
                .to_string(),
            tags: [
                "Teanna Cole",
                "Computer Science Student",
                "New York Software Developer",
                "New York, NY",
                "Machine Learning",
                "Software Engineering",
                "Backend Development",
                "Full Stack Development",
                "Web Development",
                "API Development",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            seo: Seo {
                author: "Teanna Cole".to_string(),
                birth_date: None,
                works_for: None,
                location: Location {
                    city: "New York".to_string(),
                    region: "NY".to_string(),
                    country: "US".to_string(),
                },
            },
            abacus: FooterConfig::default(),
            out: OutLinks {
                github: "https://github.com/teamial".to_string(),
                linkedin: "https://www.linkedin.com/in/teanna-cole/".to_string(),
                email: "48teanna@gmail.com".to_string(),
                calcom: None,
                wakatime: None,
                bluesky: None,
                instagram: None,
                x: None,
            },
            repo: RepoLinks {
                url: String::new(),
                commit_base_url: String::new(),
            },
        }
    }
}

impl SiteConfig {
    /// Defaults with the analytics counter taken from the environment.
    pub fn from_env() -> Self {
        Self {
            abacus: FooterConfig::from_env(),
            ..Self::default()
        }
    }

    /// `mailto:` link for the contact address.
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.out.email)
    }
}

/// Parse a millisecond count from an environment value.
fn parse_millis(name: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| {
        SiteError::Config(format!(
            "{} must be a whole number of milliseconds, got {:?}",
            name, value
        ))
    })
}
