use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The one piece of durable state: a single theme string in a small
/// file next to the content. Unreadable or garbage contents fall back
/// to the configured default instead of erroring.
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, default: Theme) -> Theme {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| Theme::parse(&s))
            .unwrap_or(default)
    }

    pub fn save(&self, theme: Theme) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, theme.as_str())
    }

    /// Flips the active theme and persists the new value.
    pub fn toggle(&self, default: Theme) -> std::io::Result<Theme> {
        let next = self.load(default).toggled();
        self.save(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("theme"));
        assert_eq!(store.load(Theme::Dark), Theme::Dark);
        assert_eq!(store.load(Theme::Light), Theme::Light);
    }

    #[test]
    fn garbage_contents_fall_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme");
        std::fs::write(&path, "solarized").unwrap();
        let store = ThemeStore::new(&path);
        assert_eq!(store.load(Theme::Dark), Theme::Dark);
    }

    #[test]
    fn toggling_twice_restores_the_original() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("theme"));
        store.save(Theme::Dark).unwrap();

        let once = store.toggle(Theme::Dark).unwrap();
        assert_eq!(once, Theme::Light);
        // Persisted value always matches the active one.
        assert_eq!(store.load(Theme::Dark), Theme::Light);

        let twice = store.toggle(Theme::Dark).unwrap();
        assert_eq!(twice, Theme::Dark);
        assert_eq!(store.load(Theme::Light), Theme::Dark);
    }
}
