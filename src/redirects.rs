// Short-link redirect table.
// Maps vanity paths like `/gh` onto outbound profile URLs.

use std::collections::HashMap;

use crate::config::SiteConfig;

/// One redirect rule: every path in `paths` points at `url`.
#[derive(Debug, Clone)]
pub struct RedirectRule {
    pub paths: Vec<String>,
    pub url: String,
}

impl RedirectRule {
    pub fn new<P, S>(paths: P, url: impl Into<String>) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            url: url.into(),
        }
    }
}

/// Lookup table built from redirect rules.
#[derive(Debug, Clone, Default)]
pub struct Redirects {
    targets: HashMap<String, String>,
}

impl Redirects {
    /// Build the table. A path named by several rules goes to the last one.
    pub fn new(rules: impl IntoIterator<Item = RedirectRule>) -> Self {
        let mut targets = HashMap::new();
        for rule in rules {
            for path in rule.paths {
                targets.insert(normalize_path(&path), rule.url.clone());
            }
        }
        Self { targets }
    }

    /// The site's default short links.
    pub fn for_site(site: &SiteConfig) -> Self {
        Self::new([
            RedirectRule::new(["/github", "/gh"], site.out.github.clone()),
            RedirectRule::new(["/linkedin", "/li"], site.out.linkedin.clone()),
            RedirectRule::new(["/email", "/contact"], site.mailto()),
            RedirectRule::new(["/resume"], "/resume.pdf"),
        ])
    }

    /// Target for `path`, ignoring a trailing slash.
    pub fn resolve(&self, path: &str) -> Option<&str> {
        self.targets.get(&normalize_path(path)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// All `(path, target)` pairs, sorted by path.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .targets
            .iter()
            .map(|(path, url)| (path.as_str(), url.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
