//! Capture targets and static-file detection.

use std::path::{Path, PathBuf};

/// A URL to capture plus the directory its artifacts live in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// The page URL handed to the capture tool.
    pub url: String,
    /// The link's own archive directory; the default output directory.
    pub link_dir: PathBuf,
}

impl Target {
    pub fn new(url: impl Into<String>, link_dir: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            link_dir: link_dir.into(),
        }
    }

    /// Resolve the output directory: an explicit override, else `link_dir`.
    pub fn out_dir<'a>(&'a self, out_dir: Option<&'a Path>) -> &'a Path {
        out_dir.unwrap_or(&self.link_dir)
    }
}

/// Lowercased extension of the last path segment of a URL.
///
/// The scheme, host, query string and fragment are ignored, so
/// `https://example.com/a/Report.PDF?dl=1` yields `pdf` while a bare
/// `https://example.com` yields nothing.
pub fn url_extension(url: &str) -> Option<String> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let without_query = without_fragment
        .split('?')
        .next()
        .unwrap_or(without_fragment);

    let after_scheme = match without_query.find("://") {
        Some(idx) => &without_query[idx + 3..],
        None => without_query,
    };

    // No '/' after the host means there is no path to inspect.
    let path = &after_scheme[after_scheme.find('/')?..];
    let segment = path.rsplit('/').next()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }

    Some(ext.to_lowercase())
}

/// Whether the URL points at a static, already-final resource.
pub fn is_static_file(url: &str, extensions: &[String]) -> bool {
    match url_extension(url) {
        Some(ext) => extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::default_static_file_extensions;

    #[test]
    fn test_url_extension() {
        assert_eq!(
            url_extension("https://example.com/a/Report.PDF?dl=1"),
            Some("pdf".to_string())
        );
        assert_eq!(
            url_extension("http://example.com/img.png#top"),
            Some("png".to_string())
        );
        assert_eq!(
            url_extension("https://example.com/archive.tar.gz"),
            Some("gz".to_string())
        );
        assert_eq!(url_extension("https://example.com"), None);
        assert_eq!(url_extension("https://example.com/"), None);
        assert_eq!(url_extension("https://example.com/blog/post"), None);
        assert_eq!(url_extension("https://example.com/.well-known"), None);
        assert_eq!(url_extension("https://files.example.com"), None);
    }

    #[test]
    fn test_is_static_file() {
        let exts = default_static_file_extensions();

        assert!(is_static_file("https://example.com/paper.pdf", &exts));
        assert!(is_static_file("https://example.com/photo.JPG", &exts));
        assert!(!is_static_file("https://example.com/index.html", &exts));
        assert!(!is_static_file("https://example.com/page.php?id=3", &exts));
        assert!(!is_static_file("https://example.com/", &exts));
    }

    #[test]
    fn test_is_static_file_custom_list() {
        let exts = vec!["html".to_string()];
        assert!(is_static_file("https://example.com/index.html", &exts));
        assert!(!is_static_file("https://example.com/paper.pdf", &exts));
    }

    #[test]
    fn test_target_out_dir_override() {
        let target = Target::new("https://example.com", "/archive/1700000000");
        assert_eq!(target.out_dir(None), Path::new("/archive/1700000000"));

        let other = PathBuf::from("/tmp/elsewhere");
        assert_eq!(target.out_dir(Some(other.as_path())), Path::new("/tmp/elsewhere"));
    }
}
