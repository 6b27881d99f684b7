use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Context;

use crate::model::{ContentModel, ModelError};
use crate::render;
use crate::template::{TemplateError, TemplateRenderer};
use crate::theme::{Theme, ThemeStore};
use crate::widgets::{Carousel, Gallery};

#[derive(Debug)]
pub enum BuildError {
    MissingModel,
    Model(ModelError),
    Template(TemplateError),
    Render(RenderError),
}

impl From<ModelError> for BuildError {
    fn from(err: ModelError) -> Self {
        BuildError::Model(err)
    }
}

impl From<TemplateError> for BuildError {
    fn from(err: TemplateError) -> Self {
        BuildError::Template(err)
    }
}

impl From<RenderError> for BuildError {
    fn from(err: RenderError) -> Self {
        BuildError::Render(err)
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::MissingModel => write!(f, "No content model provided"),
            BuildError::Model(e) => write!(f, "Content error: {}", e),
            BuildError::Template(e) => write!(f, "Template error: {}", e),
            BuildError::Render(e) => write!(f, "Render error: {}", e),
        }
    }
}

impl std::error::Error for BuildError {}

#[derive(Debug)]
pub enum RenderError {
    TemplateError(TemplateError),
    IoError(std::io::Error),
}

impl From<TemplateError> for RenderError {
    fn from(err: TemplateError) -> Self {
        RenderError::TemplateError(err)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::IoError(err)
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::TemplateError(e) => write!(f, "Template error: {}", e),
            RenderError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

pub struct SiteBuilder {
    model: Option<ContentModel>,
    theme_dir: PathBuf,
    output_dir: PathBuf,
    theme: Theme,
    dev_server: Option<(String, u16)>,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self {
            model: None,
            theme_dir: PathBuf::from("./theme"),
            output_dir: PathBuf::from("./out"),
            theme: Theme::Dark,
            dev_server: None,
        }
    }

    pub fn model(mut self, model: ContentModel) -> Self {
        self.model = Some(model);
        self
    }

    pub fn theme_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.theme_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    /// The active theme, as resolved from the theme store.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Enables live-reload wiring for the preview server.
    pub fn dev(mut self, host: &str, port: u16) -> Self {
        self.dev_server = Some((host.to_string(), port));
        self
    }

    pub fn build(self) -> Result<Site, BuildError> {
        let model = self.model.ok_or(BuildError::MissingModel)?;
        let renderer = TemplateRenderer::new(&self.theme_dir)?;

        Ok(Site {
            model,
            renderer,
            output_dir: self.output_dir,
            theme: self.theme,
            dev_server: self.dev_server,
        })
    }
}

pub struct Site {
    model: ContentModel,
    renderer: TemplateRenderer,
    output_dir: PathBuf,
    theme: Theme,
    dev_server: Option<(String, u16)>,
}

impl Site {
    pub fn model(&self) -> &ContentModel {
        &self.model
    }

    /// Assembles the full template context: every region's markup,
    /// the section visibility flags, and the widget settings the
    /// skeleton forwards as data attributes. Pure function of the
    /// model, so rendering twice is byte-identical.
    pub fn context(&self) -> Context {
        let model = &self.model;
        let mut context = Context::new();

        context.insert("page_title", &render::page_title(model));
        context.insert("person", &model.person);
        context.insert("branding", &model.branding);
        context.insert("stats", &model.about.stats);
        context.insert("contact", &model.contact);
        context.insert("seo", &model.seo);
        context.insert("settings", &model.settings);

        context.insert("theme", self.theme.as_str());
        context.insert(
            "enable_theme_toggle",
            &model.settings.theme.enable_toggle,
        );

        // The typing widget reads its role list from one attribute.
        let roles =
            serde_json::to_string(&model.person.roles).unwrap_or_else(|_| "[]".to_string());
        context.insert("typing_roles", &roles);

        context.insert("about_intro", &render::about_intro(&model.about));
        context.insert("about_details", &render::about_details(&model.about));
        context.insert("skills_html", &render::skills(&model.skills));

        let ordered = render::display_order(&model.projects);
        context.insert("projects_html", &render::projects_grid(&ordered));
        context.insert("project_modals_html", &render::project_modals(&ordered));

        let gallery = Gallery::new(ordered.iter().map(|p| p.category).collect());
        context.insert("show_load_more", &gallery.has_more());

        context.insert("timeline_work", &render::timeline(&model.experience.work));
        context.insert(
            "timeline_education",
            &render::timeline(&model.experience.education),
        );
        context.insert(
            "timeline_certifications",
            &render::timeline(&model.experience.certifications),
        );

        context.insert("services_html", &render::services_grid(&model.services));
        context.insert(
            "footer_services_html",
            &render::footer_services(&model.services),
        );

        // Index 0 starts active; an empty list leaves the region
        // hidden via the section flags.
        let active = Carousel::new(model.testimonials.len())
            .map(|c| c.active_flags())
            .unwrap_or_default();
        context.insert(
            "testimonials_html",
            &render::testimonials(&model.testimonials, &active),
        );
        context.insert("testimonial_dots_html", &render::testimonial_dots(&active));

        context.insert("blog_html", &render::blog(&model.blog));
        context.insert("social_links_html", &render::social_links(&model.social, true));
        context.insert("footer_social_html", &render::social_links(&model.social, false));
        context.insert(
            "particles_html",
            &render::particles(model.settings.animations.particle_count),
        );

        let sections: HashMap<&str, bool> = render::section_visibility(model)
            .into_iter()
            .map(|(section, visible)| (section.key(), visible))
            .collect();
        context.insert("sections", &sections);

        if let Some((host, port)) = &self.dev_server {
            context.insert("livereload_script", &livereload_script(host, *port));
        }

        context
    }

    pub fn render_index(&self) -> Result<String, RenderError> {
        Ok(self.renderer.render("index.html", &self.context())?)
    }

    pub fn render_all(&self) -> Result<(), RenderError> {
        std::fs::create_dir_all(&self.output_dir)?;
        self.renderer.render_to_file(
            "index.html",
            &self.context(),
            &self.output_dir.join("index.html"),
        )?;

        Ok(())
    }
}

/// Loads the content model, resolves the active theme from the store
/// (falling back to the model's configured default), and renders the
/// site in one go. Both the build command and the serve rebuild loop
/// come through here.
pub fn build_site(
    model_path: &Path,
    theme_dir: &Path,
    output_dir: &Path,
    store: &ThemeStore,
    dev_server: Option<(&str, u16)>,
) -> Result<(), BuildError> {
    let model = ContentModel::read(model_path)?;
    let default = Theme::parse(&model.settings.theme.default).unwrap_or(Theme::Dark);
    let theme = store.load(default);

    let mut builder = SiteBuilder::new()
        .model(model)
        .theme_dir(theme_dir)
        .output_dir(output_dir)
        .theme(theme);
    if let Some((host, port)) = dev_server {
        builder = builder.dev(host, port);
    }

    let site = builder.build()?;
    site.render_all()?;

    Ok(())
}

fn livereload_script(host: &str, port: u16) -> String {
    format!(
        concat!(
            "<script>\n",
            "(function() {{\n",
            "  const socket = new WebSocket('ws://{}:{}/__livereload');\n",
            "  socket.onmessage = function(event) {{\n",
            "    if (event.data === 'reload') {{ location.reload(); }}\n",
            "  }};\n",
            "}})();\n",
            "</script>\n",
        ),
        host, port
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Testimonial;

    const SKELETON: &str = r#"<!DOCTYPE html>
<html data-theme="{{ theme }}">
<head><title>{{ page_title }}</title></head>
<body>
<span id="typing" data-roles="{{ typing_roles }}"></span>
{% if sections.testimonials %}<section id="testimonials">{{ testimonials_html | safe }}{{ testimonial_dots_html | safe }}</section>{% endif %}
{% if sections.phone %}<p id="phone">{{ person.phone }}</p>{% endif %}
<div id="projects">{{ projects_html | safe }}</div>
{% if show_load_more %}<button id="load-more">Load More</button>{% endif %}
{{ livereload_script | default(value="") | safe }}
</body>
</html>
"#;

    fn site_with(model: ContentModel, theme_dir: &Path) -> Site {
        std::fs::write(theme_dir.join("index.html"), SKELETON).unwrap();
        SiteBuilder::new()
            .model(model)
            .theme_dir(theme_dir)
            .build()
            .unwrap()
    }

    fn model() -> ContentModel {
        let mut model = ContentModel::default();
        model.person.name = "Ada Example".into();
        model.person.title = "Engineer".into();
        model.person.roles = vec!["Engineer".into(), "Writer".into()];
        model
    }

    #[test]
    fn builder_without_model_is_a_fatal_build_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), SKELETON).unwrap();
        let err = SiteBuilder::new().theme_dir(dir.path()).build();
        assert!(matches!(err, Err(BuildError::MissingModel)));
    }

    #[test]
    fn rendered_page_carries_title_theme_and_roles() {
        let dir = tempfile::tempdir().unwrap();
        let site = site_with(model(), dir.path());
        let html = site.render_index().unwrap();

        assert!(html.contains("<title>Ada Example - Engineer</title>"));
        assert!(html.contains("data-theme=\"dark\""));
        assert!(html.contains("Engineer"));
        // No testimonials, no phone: the regions disappear instead of
        // rendering empty shells.
        assert!(!html.contains("id=\"testimonials\""));
        assert!(!html.contains("id=\"phone\""));
        assert!(!html.contains("id=\"load-more\""));
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let site = site_with(model(), dir.path());
        assert_eq!(site.render_index().unwrap(), site.render_index().unwrap());
    }

    #[test]
    fn testimonials_section_appears_when_populated() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model();
        model.testimonials.push(Testimonial {
            text: "Great work".into(),
            name: "B".into(),
            position: "CTO".into(),
            company: "Co".into(),
            image: "b.png".into(),
        });
        let site = site_with(model, dir.path());
        let html = site.render_index().unwrap();
        assert!(html.contains("id=\"testimonials\""));
        assert!(html.contains("testimonial-dot active"));
    }

    #[test]
    fn dev_mode_injects_the_livereload_script() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), SKELETON).unwrap();
        let site = SiteBuilder::new()
            .model(model())
            .theme_dir(dir.path())
            .dev("127.0.0.1", 3000)
            .build()
            .unwrap();
        let html = site.render_index().unwrap();
        assert!(html.contains("ws://127.0.0.1:3000/__livereload"));
    }

    #[test]
    fn build_site_writes_the_index_file() {
        let dir = tempfile::tempdir().unwrap();
        let theme_dir = dir.path().join("theme");
        let out_dir = dir.path().join("out");
        std::fs::create_dir_all(&theme_dir).unwrap();
        std::fs::write(theme_dir.join("index.html"), SKELETON).unwrap();

        let content = r#"
[person]
name = "Ada Example"
title = "Engineer"
description = "Builds things."
email = "ada@example.com"
location = "Lisbon"
"#;
        let model_path = dir.path().join("portfolio.toml");
        std::fs::write(&model_path, content).unwrap();

        // A persisted preference beats the model's default.
        let store = ThemeStore::new(dir.path().join("theme-state"));
        store.save(Theme::Light).unwrap();

        build_site(&model_path, &theme_dir, &out_dir, &store, None).unwrap();
        let html = std::fs::read_to_string(out_dir.join("index.html")).unwrap();
        assert!(html.contains("data-theme=\"light\""));
    }

    #[test]
    fn missing_content_model_aborts_the_build() {
        let dir = tempfile::tempdir().unwrap();
        let theme_dir = dir.path().join("theme");
        std::fs::create_dir_all(&theme_dir).unwrap();
        std::fs::write(theme_dir.join("index.html"), SKELETON).unwrap();

        let store = ThemeStore::new(dir.path().join("theme-state"));
        let err = build_site(
            &dir.path().join("nope.toml"),
            &theme_dir,
            &dir.path().join("out"),
            &store,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::Model(ModelError::Io(_))));
    }
}
