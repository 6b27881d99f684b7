pub mod builder;
pub mod contact;
pub mod model;
pub mod render;
pub mod template;
pub mod theme;
pub mod widgets;

// Re-export main types
pub use builder::{BuildError, Site, SiteBuilder, build_site};
pub use contact::{ContactForm, Submission, SubmitOutcome, SubmitReport};
pub use model::{ContentModel, ModelError, ProjectCategory, ProjectFilter};
pub use template::{TemplateError, TemplateRenderer};
pub use theme::{Theme, ThemeStore};
