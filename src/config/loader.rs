//! Manifest discovery and loading.

use crate::config::schema::Manifest;
use crate::error::{EnvgateError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest file name looked up in the project root.
pub const DEFAULT_MANIFEST: &str = "envgate.yml";

/// Locate the manifest to use.
///
/// An explicit path must exist. Without one, `envgate.yml` in the project
/// root is used if present.
///
/// # Errors
///
/// Returns `ManifestNotFound` if an explicit path does not exist.
pub fn find_manifest(project_root: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_root.join(path)
        };
        if !path.exists() {
            return Err(EnvgateError::ManifestNotFound { path });
        }
        return Ok(Some(path));
    }

    let default = project_root.join(DEFAULT_MANIFEST);
    if default.exists() {
        Ok(Some(default))
    } else {
        tracing::debug!(path = %default.display(), "no manifest found");
        Ok(None)
    }
}

/// Load and validate a manifest file.
///
/// Tag declarations are checked while loading, so a manifest that loads
/// can always be turned into component descriptors.
///
/// # Errors
///
/// Returns `ManifestNotFound` if the file doesn't exist.
/// Returns `ManifestParseError` if the YAML or a tag declaration is invalid.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EnvgateError::ManifestNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EnvgateError::Io(e)
        }
    })?;

    parse_manifest(&content, path)
}

/// Parse YAML content into a manifest.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_manifest(content: &str, source_path: &Path) -> Result<Manifest> {
    let manifest: Manifest =
        serde_yaml::from_str(content).map_err(|e| EnvgateError::ManifestParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    if let Err(e) = manifest.descriptors() {
        return Err(EnvgateError::ManifestParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        });
    }

    tracing::debug!(
        path = %source_path.display(),
        components = manifest.components.len(),
        "loaded manifest"
    );
    Ok(manifest)
}

/// Load the manifest for a project, or an empty one if there is none.
pub fn load_project_manifest(project_root: &Path, explicit: Option<&Path>) -> Result<Manifest> {
    match find_manifest(project_root, explicit)? {
        Some(path) => load_manifest(&path),
        None => Ok(Manifest::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Mode;
    use tempfile::TempDir;

    #[test]
    fn find_manifest_uses_default_name() {
        let temp = TempDir::new().unwrap();
        assert_eq!(find_manifest(temp.path(), None).unwrap(), None);

        fs::write(temp.path().join(DEFAULT_MANIFEST), "{}").unwrap();
        assert_eq!(
            find_manifest(temp.path(), None).unwrap(),
            Some(temp.path().join(DEFAULT_MANIFEST))
        );
    }

    #[test]
    fn find_manifest_explicit_relative_path() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("gates.yml"), "{}").unwrap();
        let found = find_manifest(temp.path(), Some(Path::new("gates.yml"))).unwrap();
        assert_eq!(found, Some(temp.path().join("gates.yml")));
    }

    #[test]
    fn find_manifest_explicit_missing_is_error() {
        let temp = TempDir::new().unwrap();
        let err = find_manifest(temp.path(), Some(Path::new("missing.yml"))).unwrap_err();
        assert!(matches!(err, EnvgateError::ManifestNotFound { .. }));
    }

    #[test]
    fn load_manifest_missing_file() {
        let err = load_manifest(Path::new("/nonexistent/envgate.yml")).unwrap_err();
        assert!(matches!(err, EnvgateError::ManifestNotFound { .. }));
    }

    #[test]
    fn load_manifest_reads_context() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_MANIFEST);
        fs::write(&path, "context:\n  mode: dev\n  group: east\n").unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(manifest.context.mode, Some(Mode::Dev));
        assert_eq!(manifest.context.group.as_deref(), Some("east"));
    }

    #[test]
    fn parse_manifest_invalid_yaml() {
        let err = parse_manifest("components: [", Path::new("bad.yml")).unwrap_err();
        match err {
            EnvgateError::ManifestParseError { path, .. } => {
                assert_eq!(path, PathBuf::from("bad.yml"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_manifest_rejects_bad_tags() {
        let yaml = "components:\n  - name: a\n    tags: [\"mode=nightly\"]\n";
        let err = parse_manifest(yaml, Path::new("envgate.yml")).unwrap_err();
        assert!(err.to_string().contains("nightly"));
    }

    #[test]
    fn load_project_manifest_without_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let manifest = load_project_manifest(temp.path(), None).unwrap();
        assert!(manifest.components.is_empty());
    }
}
