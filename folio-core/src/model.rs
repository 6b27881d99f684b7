use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ModelError {
    Io(std::io::Error),
    Parsing(toml::de::Error),
    Validation(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Io(e) => write!(f, "IO error: {}", e),
            ModelError::Parsing(e) => write!(f, "TOML parse error: {}", e),
            ModelError::Validation(msg) => write!(f, "Invalid content: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<std::io::Error> for ModelError {
    fn from(value: std::io::Error) -> Self {
        ModelError::Io(value)
    }
}

impl From<toml::de::Error> for ModelError {
    fn from(value: toml::de::Error) -> Self {
        ModelError::Parsing(value)
    }
}

/// The whole portfolio, loaded once from `portfolio.toml` and read-only
/// afterwards. All widget state lives outside of it.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct ContentModel {
    pub person: Person,
    #[serde(default)]
    pub branding: Branding,
    #[serde(default)]
    pub about: About,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Experience,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub blog: Vec<BlogPost>,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub seo: Seo,
    #[serde(default)]
    pub settings: Settings,
}

impl ContentModel {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let data = std::fs::read_to_string(path)?;
        let model: ContentModel = toml::from_str(&data)?;
        model.validate()?;

        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelError> {
        let mut seen = std::collections::HashSet::new();
        for project in &self.projects {
            if !seen.insert(project.id) {
                return Err(ModelError::Validation(format!(
                    "duplicate project id {}",
                    project.id
                )));
            }
        }

        for category in &self.skills {
            for skill in &category.items {
                if skill.percentage > 100 {
                    return Err(ModelError::Validation(format!(
                        "skill \"{}\" has percentage {} (expected 0-100)",
                        skill.name, skill.percentage
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn project(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct Person {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub description: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: String,
    pub profile_image: Option<String>,
    pub about_image: Option<String>,
    pub resume: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct Branding {
    pub logo: String,
    pub tagline: String,
    pub footer_text: String,
    pub copyright: String,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct About {
    pub intro: String,
    pub details: Vec<String>,
    pub stats: Stats,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct Stats {
    pub projects: u64,
    pub experience: u64,
    pub clients: u64,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct SkillCategory {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub items: Vec<Skill>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Skill {
    pub name: String,
    pub level: String,
    pub percentage: u8,
}

/// Closed category set. The filter side pairs this with
/// [`ProjectFilter`] so "all" can never collide with a category label.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Web,
    Mobile,
    Design,
    Other,
}

impl ProjectCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Web => "web",
            ProjectCategory::Mobile => "mobile",
            ProjectCategory::Design => "design",
            ProjectCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFilter {
    All,
    Category(ProjectCategory),
}

impl ProjectFilter {
    pub fn matches(&self, category: ProjectCategory) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Category(c) => *c == category,
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "all" => Some(ProjectFilter::All),
            "web" => Some(ProjectFilter::Category(ProjectCategory::Web)),
            "mobile" => Some(ProjectFilter::Category(ProjectCategory::Mobile)),
            "design" => Some(ProjectFilter::Category(ProjectCategory::Design)),
            "other" => Some(ProjectFilter::Category(ProjectCategory::Other)),
            _ => None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: ProjectCategory,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub details: Option<ProjectDetails>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ProjectDetails {
    pub overview: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub challenge: Option<String>,
    pub solution: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct Experience {
    pub work: Vec<TimelineEntry>,
    pub education: Vec<TimelineEntry>,
    pub certifications: Vec<TimelineEntry>,
}

/// One entry in any of the three timelines. `org` is the company,
/// institution or issuer depending on the list it sits in.
#[derive(Deserialize, Serialize, Debug)]
pub struct TimelineEntry {
    pub title: String,
    pub org: String,
    pub location: Option<String>,
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    pub credential_id: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Service {
    #[serde(default)]
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Testimonial {
    pub text: String,
    pub name: String,
    pub position: String,
    pub company: String,
    pub image: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct BlogPost {
    pub title: String,
    pub excerpt: String,
    pub image: String,
    pub date: String,
    pub read_time: String,
    pub category: String,
    pub url: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct SocialLink {
    pub name: String,
    pub icon: String,
    pub url: String,
    pub color: String,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(default)]
pub struct Contact {
    pub title: String,
    pub description: String,
    pub messages: FormMessages,
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            title: "Let's Connect".to_string(),
            description: String::new(),
            messages: FormMessages::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct FormMessages {
    pub success: String,
    pub error: String,
    pub sending: String,
}

impl Default for FormMessages {
    fn default() -> Self {
        Self {
            success: "Thank you for your message! I'll get back to you soon.".to_string(),
            error: "Oops! Something went wrong. Please try again later.".to_string(),
            sending: "Sending your message...".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct Seo {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub image: String,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct Settings {
    pub animations: AnimationSettings,
    pub theme: ThemeSettings,
    pub form: FormSettings,
    pub features: Features,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct AnimationSettings {
    /// Milliseconds per typed character. Deleting runs at half this.
    pub typing_speed: u64,
    /// Hold time on a fully typed role before deleting starts.
    pub typing_delay: u64,
    pub particle_count: u32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            typing_speed: 100,
            typing_delay: 2000,
            particle_count: 50,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(default)]
pub struct ThemeSettings {
    pub default: String,
    pub enable_toggle: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            default: "dark".to_string(),
            enable_toggle: true,
        }
    }
}

/// Written into generated configs as-is. Submissions fall back to a
/// simulated success while the endpoint still carries this value.
pub const ENDPOINT_PLACEHOLDER: &str = "https://formspree.io/f/YOUR_FORM_ID";

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct FormSettings {
    pub endpoint: String,
    pub enable_recaptcha: bool,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            endpoint: ENDPOINT_PLACEHOLDER.to_string(),
            enable_recaptcha: false,
        }
    }
}

impl FormSettings {
    /// The destination endpoint, or `None` while it is still the
    /// placeholder from the starter config.
    pub fn configured_endpoint(&self) -> Option<&str> {
        if self.endpoint.is_empty() || self.endpoint == ENDPOINT_PLACEHOLDER {
            None
        } else {
            Some(&self.endpoint)
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(default)]
pub struct Features {
    pub blog: bool,
    pub testimonials: bool,
    pub services: bool,
    pub particles: bool,
    pub back_to_top: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            blog: true,
            testimonials: true,
            services: true,
            particles: true,
            back_to_top: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_toml() -> &'static str {
        r#"
[person]
name = "Ada Example"
title = "Systems Engineer"
roles = ["Engineer", "Writer"]
description = "Builds things."
email = "ada@example.com"
location = "Lisbon, Portugal"

[[projects]]
id = 1
title = "First"
description = "d"
image = "a.png"
category = "web"

[[projects]]
id = 2
title = "Second"
description = "d"
image = "b.png"
category = "mobile"
featured = true
"#
    }

    #[test]
    fn parses_minimal_model() {
        let model: ContentModel = toml::from_str(minimal_toml()).unwrap();
        assert_eq!(model.person.roles.len(), 2);
        assert_eq!(model.projects.len(), 2);
        assert_eq!(model.projects[1].category, ProjectCategory::Mobile);
        assert!(model.testimonials.is_empty());
        assert_eq!(model.settings.animations.typing_speed, 100);
        assert_eq!(model.settings.theme.default, "dark");
    }

    #[test]
    fn projects_are_addressable_by_id() {
        let model: ContentModel = toml::from_str(minimal_toml()).unwrap();
        assert_eq!(model.project(2).unwrap().title, "Second");
        assert!(model.project(99).is_none());
    }

    #[test]
    fn duplicate_project_ids_are_rejected() {
        let mut model: ContentModel = toml::from_str(minimal_toml()).unwrap();
        model.projects[1].id = 1;
        let err = model.validate().unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
    }

    #[test]
    fn out_of_range_percentage_is_rejected() {
        let mut model: ContentModel = toml::from_str(minimal_toml()).unwrap();
        model.skills.push(SkillCategory {
            name: "Tools".into(),
            icon: String::new(),
            items: vec![Skill {
                name: "Git".into(),
                level: "Advanced".into(),
                percentage: 120,
            }],
        });
        assert!(model.validate().is_err());
    }

    #[test]
    fn placeholder_endpoint_counts_as_unconfigured() {
        let form = FormSettings::default();
        assert!(form.configured_endpoint().is_none());

        let form = FormSettings {
            endpoint: "https://example.com/contact".into(),
            enable_recaptcha: false,
        };
        assert_eq!(
            form.configured_endpoint(),
            Some("https://example.com/contact")
        );
    }

    #[test]
    fn filter_parsing_covers_the_closed_set() {
        assert_eq!(ProjectFilter::parse("all"), Some(ProjectFilter::All));
        assert_eq!(
            ProjectFilter::parse("design"),
            Some(ProjectFilter::Category(ProjectCategory::Design))
        );
        assert_eq!(ProjectFilter::parse("stuff"), None);
    }
}
