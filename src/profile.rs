// Static profile content.
// Social links, experience timeline, and achievements shown on the home and about pages.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::SiteConfig;

/// Link to a social profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub url: String,
    pub label: String,
    /// Whether the link is repeated in the footer.
    pub footer: bool,
}

/// Link rendered on the home page hero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeLink {
    pub href: String,
    pub text: String,
}

/// One role on the experience timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    pub company: String,
    pub role: String,
    pub url: String,
    pub logo_url: String,
    pub logo_alt: String,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_scale: Option<f32>,
}

impl ExperienceItem {
    /// A role with an end date is finished.
    pub fn is_past(&self) -> bool {
        self.end_date.is_some()
    }
}

/// Entry in the achievements list: either a bare line or a titled link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Achievement {
    Text(String),
    Link {
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        href: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        date: Option<String>,
    },
}

/// Everything the profile pages render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub socials: Vec<SocialLink>,
    pub home_links: Vec<HomeLink>,
    pub experience: Vec<ExperienceItem>,
    pub achievements: Vec<Achievement>,
}

impl Profile {
    pub fn for_site(site: &SiteConfig) -> Self {
        Self {
            socials: socials(site),
            home_links: home_links(site),
            experience: experience_timeline(),
            achievements: achievements(),
        }
    }
}

pub fn socials(site: &SiteConfig) -> Vec<SocialLink> {
    vec![
        SocialLink {
            url: site.out.github.clone(),
            label: "GitHub".to_string(),
            footer: true,
        },
        SocialLink {
            url: site.out.linkedin.clone(),
            label: "LinkedIn".to_string(),
            footer: true,
        },
    ]
}

pub fn home_links(site: &SiteConfig) -> Vec<HomeLink> {
    vec![
        HomeLink {
            href: site.out.github.clone(),
            text: "GitHub".to_string(),
        },
        HomeLink {
            href: site.out.linkedin.clone(),
            text: "LinkedIn".to_string(),
        },
        HomeLink {
            href: site.mailto(),
            text: "Email".to_string(),
        },
    ]
}

/// Experience entries, newest start date first.
pub fn experience_timeline() -> Vec<ExperienceItem> {
    let mut items = vec![
        role(
            "National Science Foundation (NSF)",
            "Software Engineer Intern, ML",
            "https://www.nsf.gov/",
            ("/logos/nsf.svg", "NSF"),
            (date(2025, 6, 1), Some(date(2025, 8, 1))),
            "Built RADAR signal detection queries in GNU Radio and validated detection \
             algorithms across large datasets.",
        ),
        role(
            "Morgan Stanley",
            "Software Engineer Intern",
            "https://www.morganstanley.com/",
            ("/logos/morganstanley.svg", "Morgan Stanley"),
            (date(2025, 1, 1), Some(date(2025, 2, 1))),
            "Built Redis CRUD API caching and authored API documentation to streamline \
             adoption and reduce support tickets.",
        ),
        role(
            "Break Through Tech (BTT AI)",
            "Machine Learning Engineer Fellow",
            "https://breakthroughtech.org/",
            ("/logos/btt.svg", "Break Through Tech"),
            (date(2025, 5, 1), Some(date(2025, 8, 1))),
            "Built and optimized NLP and vision models, improving inference time and \
             accuracy through hyperparameter tuning.",
        ),
    ];

    items.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    items
}

pub fn achievements() -> Vec<Achievement> {
    vec![
        Achievement::Text(
            "B.S. Computer Science @ Lehman College (CUNY), Expected May 2027".to_string(),
        ),
        link(
            "Software Engineer Intern, ML (NSF)",
            Some("Built RADAR signal detection queries and validated detection algorithms."),
            "https://www.nsf.gov/",
            "2025",
        ),
        link(
            "Software Engineer Intern (Morgan Stanley)",
            Some("Built API caching features and authored API documentation."),
            "https://www.morganstanley.com/",
            "2025",
        ),
        link(
            "Machine Learning Engineer Fellow (Break Through Tech / BTT AI)",
            None,
            "https://breakthroughtech.org/",
            "2025",
        ),
        Achievement::Text("Google (Code2Career & VSWEP), Software Engineering Mentee".to_string()),
        Achievement::Text("Atlassian, Software Engineering Mentee".to_string()),
        Achievement::Text(
            "Management Leadership for Tomorrow (MLT), Career Preparation Fellow".to_string(),
        ),
    ]
}

fn role(
    company: &str,
    title: &str,
    url: &str,
    (logo_url, logo_alt): (&str, &str),
    (start_date, end_date): (NaiveDate, Option<NaiveDate>),
    details: &str,
) -> ExperienceItem {
    ExperienceItem {
        company: company.to_string(),
        role: title.to_string(),
        url: url.to_string(),
        logo_url: logo_url.to_string(),
        logo_alt: logo_alt.to_string(),
        start_date,
        end_date,
        details: Some(details.to_string()),
        logo_scale: None,
    }
}

fn link(title: &str, description: Option<&str>, href: &str, date: &str) -> Achievement {
    Achievement::Link {
        title: title.to_string(),
        description: description.map(String::from),
        href: href.to_string(),
        date: Some(date.to_string()),
    }
}

/// Calendar date from a timeline literal. Panics on an impossible date.
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid timeline date {year}-{month:02}-{day:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timeline_newest_first() {
        let companies: Vec<String> = experience_timeline()
            .into_iter()
            .map(|item| item.company)
            .collect();

        assert_eq!(
            companies,
            vec![
                "National Science Foundation (NSF)",
                "Break Through Tech (BTT AI)",
                "Morgan Stanley",
            ]
        );
    }

    #[test]
    fn test_timeline_dates_are_real() {
        for item in experience_timeline() {
            assert_ne!(item.start_date, NaiveDate::default(), "{}", item.company);
            let end = item.end_date.unwrap();
            assert!(item.start_date < end, "{}", item.company);
        }
    }

    #[test]
    #[should_panic(expected = "invalid timeline date 2025-02-30")]
    fn test_impossible_date_panics() {
        date(2025, 2, 30);
    }

    #[test]
    fn test_past_roles() {
        assert!(experience_timeline().iter().all(ExperienceItem::is_past));
    }

    #[test]
    fn test_experience_serializes_dates() {
        let item = &experience_timeline()[0];
        let value = serde_json::to_value(item).unwrap();

        assert_eq!(value["startDate"], "2025-06-01");
        assert_eq!(value["endDate"], "2025-08-01");
        assert!(value.get("logoScale").is_none());
    }

    #[test]
    fn test_achievements_mix_text_and_links() {
        let value = serde_json::to_value(achievements()).unwrap();

        assert!(value[0].is_string());
        assert_eq!(value[1]["href"], "https://www.nsf.gov/");
        assert!(value[3].get("description").is_none());
    }

    #[test]
    fn test_home_links_use_site_config() {
        let site = SiteConfig::default();
        let links = home_links(&site);

        assert_eq!(links.len(), 3);
        assert_eq!(links[2].href, "mailto:48teanna@gmail.com");
        assert!(socials(&site).iter().all(|s| s.footer));
    }

    #[test]
    fn test_profile_json_shape() {
        let profile = Profile::for_site(&SiteConfig::default());
        let value = serde_json::to_value(&profile).unwrap();

        assert_eq!(value["socials"][0], json!({
            "url": "https://github.com/teamial",
            "label": "GitHub",
            "footer": true
        }));
        assert!(value["homeLinks"].is_array());
    }
}
