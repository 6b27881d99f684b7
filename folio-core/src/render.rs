//! Region renderers: pure functions from model slices to markup.
//! Every function is deterministic, so rendering the same model twice
//! produces byte-identical output. Model text goes through
//! `html_escape` on the way in; only the structure here is markup.

use html_escape::{encode_quoted_attribute, encode_text};

use crate::model::{
    About, BlogPost, ContentModel, Project, Service, SkillCategory, SocialLink, Testimonial,
    TimelineEntry,
};
use crate::widgets::gallery::INITIAL_PAGE_SIZE;

/// Sections the page may hide entirely instead of rendering an empty
/// shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Skills,
    Projects,
    Work,
    Education,
    Certifications,
    Services,
    Testimonials,
    Blog,
    Phone,
    Particles,
    BackToTop,
}

impl Section {
    pub fn key(&self) -> &'static str {
        match self {
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Work => "work",
            Section::Education => "education",
            Section::Certifications => "certifications",
            Section::Services => "services",
            Section::Testimonials => "testimonials",
            Section::Blog => "blog",
            Section::Phone => "phone",
            Section::Particles => "particles",
            Section::BackToTop => "back_to_top",
        }
    }
}

/// The one place that decides section visibility: a section shows iff
/// its feature toggle is on and its model slice is non-empty.
pub fn section_visibility(model: &ContentModel) -> Vec<(Section, bool)> {
    let features = &model.settings.features;
    vec![
        (Section::Skills, !model.skills.is_empty()),
        (Section::Projects, !model.projects.is_empty()),
        (Section::Work, !model.experience.work.is_empty()),
        (Section::Education, !model.experience.education.is_empty()),
        (
            Section::Certifications,
            !model.experience.certifications.is_empty(),
        ),
        (Section::Services, features.services && !model.services.is_empty()),
        (
            Section::Testimonials,
            features.testimonials && !model.testimonials.is_empty(),
        ),
        (Section::Blog, features.blog && !model.blog.is_empty()),
        (Section::Phone, model.person.phone.is_some()),
        (
            Section::Particles,
            features.particles && model.settings.animations.particle_count > 0,
        ),
        (Section::BackToTop, features.back_to_top),
    ]
}

pub fn page_title(model: &ContentModel) -> String {
    format!("{} - {}", model.person.name, model.person.title)
}

pub fn about_intro(about: &About) -> String {
    format!("<p>{}</p>\n", encode_text(&about.intro))
}

pub fn about_details(about: &About) -> String {
    about
        .details
        .iter()
        .map(|d| format!("<p>{}</p>\n", encode_text(d)))
        .collect()
}

pub fn skills(categories: &[SkillCategory]) -> String {
    let mut html = String::new();
    for category in categories {
        html.push_str(&format!(
            "<div class=\"skill-category animate-on-scroll\">\n<h3><i class=\"{}\"></i> {}</h3>\n<div class=\"skills-list\">\n",
            encode_quoted_attribute(&category.icon),
            encode_text(&category.name),
        ));
        for skill in &category.items {
            html.push_str(&format!(
                concat!(
                    "<div class=\"skill-item\">\n",
                    "<div class=\"skill-info\"><span class=\"skill-name\">{}</span>",
                    "<span class=\"skill-level\">{}</span></div>\n",
                    "<div class=\"skill-bar\"><div class=\"skill-progress\" data-percentage=\"{}\"></div></div>\n",
                    "</div>\n",
                ),
                encode_text(&skill.name),
                encode_text(&skill.level),
                skill.percentage,
            ));
        }
        html.push_str("</div>\n</div>\n");
    }
    html
}

/// Featured projects first, original order within each half. This is
/// the display order the gallery paginates over.
pub fn display_order(projects: &[Project]) -> Vec<&Project> {
    let mut ordered: Vec<&Project> = projects.iter().filter(|p| p.featured).collect();
    ordered.extend(projects.iter().filter(|p| !p.featured));
    ordered
}

/// The grid rendered up front: display order truncated to the initial
/// page size. The rest is materialized by the load-more control.
pub fn projects_grid(ordered: &[&Project]) -> String {
    ordered
        .iter()
        .take(INITIAL_PAGE_SIZE)
        .map(|p| project_card(p))
        .collect()
}

pub fn project_card(project: &Project) -> String {
    let mut links = String::new();
    if let Some(url) = &project.live_url {
        links.push_str(&format!(
            "<a href=\"{}\" class=\"project-link\" target=\"_blank\">Live Demo</a>",
            encode_quoted_attribute(url)
        ));
    }
    if let Some(url) = &project.github_url {
        links.push_str(&format!(
            "<a href=\"{}\" class=\"project-link\" target=\"_blank\">Source Code</a>",
            encode_quoted_attribute(url)
        ));
    }

    format!(
        concat!(
            "<div class=\"project-card animate-on-scroll\" data-category=\"{}\" data-project=\"{}\">\n",
            "<img src=\"{}\" alt=\"{}\" class=\"project-image\" loading=\"lazy\">\n",
            "<div class=\"project-content\">\n",
            "<h3 class=\"project-title\">{}</h3>\n",
            "<p class=\"project-description\">{}</p>\n",
            "<div class=\"project-tech\">{}</div>\n",
            "<div class=\"project-links\">{}</div>\n",
            "</div>\n</div>\n",
        ),
        project.category.as_str(),
        project.id,
        encode_quoted_attribute(&project.image),
        encode_quoted_attribute(&project.title),
        encode_text(&project.title),
        encode_text(&project.description),
        tech_tags(&project.technologies),
        links,
    )
}

fn tech_tags(technologies: &[String]) -> String {
    technologies
        .iter()
        .map(|t| format!("<span class=\"tech-tag\">{}</span>", encode_text(t)))
        .collect()
}

/// Modal bodies for every project, keyed by id and hidden until
/// opened.
pub fn project_modals(ordered: &[&Project]) -> String {
    ordered.iter().map(|p| project_modal(p)).collect()
}

pub fn project_modal(project: &Project) -> String {
    let mut body = format!(
        concat!(
            "<div class=\"project-modal\" data-project=\"{}\" hidden>\n",
            "<img src=\"{}\" alt=\"{}\" class=\"project-modal-image\">\n",
            "<h2 class=\"project-modal-title\">{}</h2>\n",
            "<p class=\"project-modal-description\">{}</p>\n",
        ),
        project.id,
        encode_quoted_attribute(&project.image),
        encode_quoted_attribute(&project.title),
        encode_text(&project.title),
        encode_text(&project.description),
    );

    if let Some(details) = &project.details {
        body.push_str(&format!(
            "<h3>Overview</h3>\n<p>{}</p>\n",
            encode_text(&details.overview)
        ));
        if !details.features.is_empty() {
            body.push_str("<h3>Key Features</h3>\n<ul>\n");
            for feature in &details.features {
                body.push_str(&format!("<li>{}</li>\n", encode_text(feature)));
            }
            body.push_str("</ul>\n");
        }
        if let (Some(challenge), Some(solution)) = (&details.challenge, &details.solution) {
            body.push_str(&format!(
                concat!(
                    "<h3>Challenges &amp; Solutions</h3>\n",
                    "<p><strong>Challenge:</strong> {}</p>\n",
                    "<p><strong>Solution:</strong> {}</p>\n",
                ),
                encode_text(challenge),
                encode_text(solution),
            ));
        }
    }

    body.push_str(&format!(
        "<h3>Technologies Used</h3>\n<div class=\"tech-tags\">{}</div>\n</div>\n",
        tech_tags(&project.technologies)
    ));

    body
}

pub fn timeline(entries: &[TimelineEntry]) -> String {
    let mut html = String::new();
    for entry in entries {
        let org = match &entry.location {
            Some(location) => format!(
                "{} - {}",
                encode_text(&entry.org),
                encode_text(location)
            ),
            None => encode_text(&entry.org).to_string(),
        };

        html.push_str(&format!(
            concat!(
                "<div class=\"timeline-item animate-on-scroll\">\n",
                "<div class=\"timeline-date\">{}</div>\n",
                "<h3 class=\"timeline-title\">{}</h3>\n",
                "<div class=\"timeline-company\">{}</div>\n",
                "<p class=\"timeline-description\">{}</p>\n",
            ),
            encode_text(&entry.date),
            encode_text(&entry.title),
            org,
            encode_text(&entry.description),
        ));

        if !entry.achievements.is_empty() {
            html.push_str("<ul class=\"timeline-achievements\">\n");
            for achievement in &entry.achievements {
                html.push_str(&format!("<li>{}</li>\n", encode_text(achievement)));
            }
            html.push_str("</ul>\n");
        }
        if let Some(credential) = &entry.credential_id {
            html.push_str(&format!(
                "<p class=\"timeline-credential\">Credential ID: {}</p>\n",
                encode_text(credential)
            ));
        }
        html.push_str("</div>\n");
    }
    html
}

pub fn services_grid(services: &[Service]) -> String {
    services
        .iter()
        .map(|s| {
            format!(
                concat!(
                    "<div class=\"service-card animate-on-scroll\">\n",
                    "<div class=\"service-icon\"><i class=\"{}\"></i></div>\n",
                    "<h3 class=\"service-title\">{}</h3>\n",
                    "<p class=\"service-description\">{}</p>\n",
                    "</div>\n",
                ),
                encode_quoted_attribute(&s.icon),
                encode_text(&s.title),
                encode_text(&s.description),
            )
        })
        .collect()
}

/// The footer lists at most four services.
pub fn footer_services(services: &[Service]) -> String {
    services
        .iter()
        .take(4)
        .map(|s| format!("<li><a href=\"#services\">{}</a></li>\n", encode_text(&s.title)))
        .collect()
}

/// `active` comes from the carousel; index 0 is active on first
/// render.
pub fn testimonials(items: &[Testimonial], active: &[bool]) -> String {
    items
        .iter()
        .zip(active)
        .map(|(t, is_active)| {
            format!(
                concat!(
                    "<div class=\"testimonial-item{}\">\n",
                    "<p class=\"testimonial-text\">\"{}\"</p>\n",
                    "<div class=\"testimonial-author\">\n",
                    "<img src=\"{}\" alt=\"{}\" class=\"testimonial-avatar\">\n",
                    "<div class=\"testimonial-info\"><h4>{}</h4><p>{} at {}</p></div>\n",
                    "</div>\n</div>\n",
                ),
                if *is_active { " active" } else { "" },
                encode_text(&t.text),
                encode_quoted_attribute(&t.image),
                encode_quoted_attribute(&t.name),
                encode_text(&t.name),
                encode_text(&t.position),
                encode_text(&t.company),
            )
        })
        .collect()
}

pub fn testimonial_dots(active: &[bool]) -> String {
    active
        .iter()
        .enumerate()
        .map(|(i, is_active)| {
            format!(
                "<div class=\"testimonial-dot{}\" data-index=\"{}\"></div>\n",
                if *is_active { " active" } else { "" },
                i,
            )
        })
        .collect()
}

pub fn blog(posts: &[BlogPost]) -> String {
    posts
        .iter()
        .map(|post| {
            format!(
                concat!(
                    "<article class=\"blog-card animate-on-scroll\">\n",
                    "<img src=\"{}\" alt=\"{}\" class=\"blog-image\" loading=\"lazy\">\n",
                    "<div class=\"blog-content\">\n",
                    "<div class=\"blog-meta\"><span>{}</span><span>{}</span><span>{}</span></div>\n",
                    "<h3 class=\"blog-title\">{}</h3>\n",
                    "<p class=\"blog-excerpt\">{}</p>\n",
                    "<a href=\"{}\" class=\"blog-read-more\" target=\"_blank\">Read More</a>\n",
                    "</div>\n</article>\n",
                ),
                encode_quoted_attribute(&post.image),
                encode_quoted_attribute(&post.title),
                encode_text(&post.date),
                encode_text(&post.read_time),
                encode_text(&post.category),
                encode_text(&post.title),
                encode_text(&post.excerpt),
                encode_quoted_attribute(&post.url),
            )
        })
        .collect()
}

pub fn social_links(links: &[SocialLink], colored: bool) -> String {
    links
        .iter()
        .map(|link| {
            let style = if colored {
                format!(" style=\"--hover-color: {}\"", encode_quoted_attribute(&link.color))
            } else {
                String::new()
            };
            format!(
                "<a href=\"{}\" class=\"social-link\" target=\"_blank\" rel=\"noopener noreferrer\"{}><i class=\"{}\"></i></a>\n",
                encode_quoted_attribute(&link.url),
                style,
                encode_quoted_attribute(&link.icon),
            )
        })
        .collect()
}

/// Decorative particle field. Positions and timings are derived from
/// the particle index, keeping the renderer idempotent where the
/// original effect rolled dice.
pub fn particles(count: u32) -> String {
    let mut html = String::new();
    for i in 0..count {
        let left = scatter(u64::from(i) * 4) * 100.0;
        let top = scatter(u64::from(i) * 4 + 1) * 100.0;
        let delay = scatter(u64::from(i) * 4 + 2) * 6.0;
        let duration = 3.0 + scatter(u64::from(i) * 4 + 3) * 3.0;
        html.push_str(&format!(
            "<div class=\"particle\" style=\"left: {:.1}%; top: {:.1}%; animation-delay: {:.1}s; animation-duration: {:.1}s\"></div>\n",
            left, top, delay, duration,
        ));
    }
    html
}

// splitmix64, mapped onto [0, 1).
fn scatter(seed: u64) -> f64 {
    let mut x = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^= x >> 31;
    (x >> 11) as f64 / (1u64 << 53) as f64
}
