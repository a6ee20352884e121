use std::path::{Path, PathBuf};

use crate::dom::markup::SiteMarkup;
use crate::error::{Result, SiteError};

/// A loaded site page: its markup and where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub markup: SiteMarkup,
    /// Markup file on disk, `None` for the built-in demo page
    pub path: Option<PathBuf>,
}

/// A link that leaves the current page
#[derive(Debug, Clone, PartialEq)]
pub struct PageLink {
    /// Markup file of the target page
    pub path: PathBuf,
    /// Section to scroll to once the page is loaded
    pub fragment: Option<String>,
}

impl Site {
    /// The built-in demo page
    pub fn demo() -> Self {
        Self {
            markup: SiteMarkup::demo(),
            path: None,
        }
    }

    /// Directory relative paths (assets, links) are resolved against
    pub fn base_dir(&self) -> PathBuf {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve an image `src` to a file on disk
    pub fn resolve_asset(&self, src: &str) -> PathBuf {
        let src = Path::new(src);
        if src.is_absolute() {
            src.to_path_buf()
        } else {
            self.base_dir().join(src)
        }
    }

    /// Map an `other.html#section` link to the sibling markup file
    /// `other.json`. Returns `None` for external URLs and bare anchors.
    pub fn resolve_link(&self, href: &str) -> Option<PageLink> {
        if href.contains("://") || href.starts_with("mailto:") {
            return None;
        }

        let (page, fragment) = match href.split_once('#') {
            Some((page, fragment)) => (page, Some(fragment)),
            None => (href, None),
        };
        if page.is_empty() {
            return None;
        }

        let path = self.base_dir().join(page).with_extension("json");
        Some(PageLink {
            path,
            fragment: fragment.filter(|f| !f.is_empty()).map(str::to_string),
        })
    }
}

/// Get the path where the default site file is looked up
///
/// - Linux: ~/.local/share/gallery-site/site.json
/// - macOS: ~/Library/Application Support/gallery-site/site.json
/// - Windows: %APPDATA%\gallery-site\site.json
pub fn default_site_path() -> Result<PathBuf> {
    let mut path = dirs::data_dir()
        .or_else(dirs::home_dir)
        .ok_or(SiteError::NoDataDir)?;

    path.push("gallery-site");
    path.push("site.json");
    Ok(path)
}

/// Read and parse a site markup file
pub async fn load_site(path: PathBuf) -> Result<Site> {
    let json = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| SiteError::Io {
            path: path.clone(),
            source,
        })?;

    let markup = SiteMarkup::from_json(&json)?;
    log::info!(
        "📄 Loaded \"{}\" from {} ({} sections, {} gallery items)",
        markup.title,
        path.display(),
        markup.sections.len(),
        markup.gallery.len()
    );

    Ok(Site {
        markup,
        path: Some(path),
    })
}

/// Load the site to show at startup: an explicit path, else the default
/// site file.
pub async fn load_startup_site(explicit: Option<PathBuf>) -> Result<Site> {
    match explicit {
        Some(path) => load_site(path).await,
        None => load_or_create_site(default_site_path()?).await,
    }
}

/// Load the site file at `path`. On first run the demo page is written there
/// as a starting point for editing.
pub async fn load_or_create_site(path: PathBuf) -> Result<Site> {
    let exists = tokio::fs::try_exists(&path)
        .await
        .map_err(|source| SiteError::Io {
            path: path.clone(),
            source,
        })?;
    if exists {
        return load_site(path).await;
    }

    let site = Site::demo();
    match write_markup(&path, &site.markup).await {
        Ok(()) => {
            log::info!("📝 Wrote demo site to {}", path.display());
            Ok(Site {
                path: Some(path),
                ..site
            })
        }
        Err(e) => {
            // Not fatal: the demo still works from memory
            log::warn!("⚠️  Could not write demo site: {}", e);
            Ok(site)
        }
    }
}

async fn write_markup(path: &Path, markup: &SiteMarkup) -> Result<()> {
    let io_error = |source: std::io::Error| SiteError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(path, markup.to_json()?)
        .await
        .map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gallery-site-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_resolve_link() {
        let site = Site {
            markup: SiteMarkup::demo(),
            path: Some(PathBuf::from("/srv/club/index.json")),
        };

        assert_eq!(
            site.resolve_link("archive.html#home"),
            Some(PageLink {
                path: PathBuf::from("/srv/club/archive.json"),
                fragment: Some("home".to_string()),
            })
        );
        assert_eq!(
            site.resolve_link("gallery.html"),
            Some(PageLink {
                path: PathBuf::from("/srv/club/gallery.json"),
                fragment: None,
            })
        );
        assert_eq!(site.resolve_link("#about"), None);
        assert_eq!(site.resolve_link("https://example.com/x.html"), None);
    }

    #[test]
    fn test_resolve_asset() {
        let site = Site {
            markup: SiteMarkup::demo(),
            path: Some(PathBuf::from("/srv/club/index.json")),
        };
        assert_eq!(
            site.resolve_asset("assets/a.jpg"),
            PathBuf::from("/srv/club/assets/a.jpg")
        );
        assert_eq!(Site::demo().resolve_asset("a.jpg"), PathBuf::from("./a.jpg"));
    }

    #[tokio::test]
    async fn test_load_site() {
        let json = SiteMarkup::demo().to_json().unwrap();
        let path = temp_file("load.json", &json);

        let site = load_site(path.clone()).await.unwrap();
        assert_eq!(site.markup, SiteMarkup::demo());
        assert_eq!(site.path, Some(path));
    }

    #[tokio::test]
    async fn test_write_then_load() {
        let dir = std::env::temp_dir().join(format!("gallery-site-write-{}", std::process::id()));
        let path = dir.join("nested").join("site.json");

        write_markup(&path, &SiteMarkup::demo()).await.unwrap();
        let site = load_site(path).await.unwrap();
        assert_eq!(site.markup.title, "Lumière Photo Club");
    }

    #[tokio::test]
    async fn test_startup_prefers_explicit_path() {
        let mut markup = SiteMarkup::demo();
        markup.title = "Explicit".to_string();
        let path = temp_file("explicit.json", &markup.to_json().unwrap());

        let site = load_startup_site(Some(path.clone())).await.unwrap();
        assert_eq!(site.markup.title, "Explicit");
        assert_eq!(site.path, Some(path));

        let missing = load_startup_site(Some(PathBuf::from("/nonexistent/explicit.json"))).await;
        assert!(matches!(missing, Err(SiteError::Io { .. })));
    }

    #[tokio::test]
    async fn test_existing_site_file_is_loaded() {
        let mut markup = SiteMarkup::demo();
        markup.title = "Edited".to_string();
        let path = temp_file("existing.json", &markup.to_json().unwrap());

        let site = load_or_create_site(path.clone()).await.unwrap();
        assert_eq!(site.markup.title, "Edited");
        assert_eq!(site.path, Some(path));
    }

    #[tokio::test]
    async fn test_missing_site_file_gets_demo() {
        let dir = std::env::temp_dir().join(format!("gallery-site-first-run-{}", std::process::id()));
        let path = dir.join("site.json");
        let _ = std::fs::remove_file(&path);

        let site = load_or_create_site(path.clone()).await.unwrap();
        assert_eq!(site.markup, SiteMarkup::demo());
        assert_eq!(site.path, Some(path.clone()));

        // Written out for the next run
        let written = load_site(path).await.unwrap();
        assert_eq!(written.markup, SiteMarkup::demo());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_site_dir_is_not_overwritten() {
        use std::os::unix::fs::PermissionsExt;

        let dir = std::env::temp_dir().join(format!("gallery-site-locked-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o000)).unwrap();

        let path = dir.join("site.json");
        let access = std::fs::metadata(&path);
        let result = load_or_create_site(path).await;
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o755)).unwrap();

        // Root ignores directory permissions; only check when access was denied
        if matches!(&access, Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied) {
            assert!(matches!(result, Err(SiteError::Io { .. })));
        }
    }

    #[tokio::test]
    async fn test_load_errors() {
        let missing = load_site(PathBuf::from("/nonexistent/site.json")).await;
        assert!(matches!(missing, Err(SiteError::Io { .. })));

        let path = temp_file("broken.json", "{ not json");
        let broken = load_site(path).await;
        assert!(matches!(broken, Err(SiteError::Markup(_))));
    }
}
