//! # Input and Output Naming
//!
//! The output file name is a pure function of the input's base name: the
//! trailing [`INPUT_SUFFIX`] is stripped (when present) and the name is
//! rebuilt behind [`OUTPUT_PREFIX`]. Directories never influence the name.

use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{CycleError, Result};

/// Extension stripped from the input's base name (case-sensitive).
pub const INPUT_SUFFIX: &str = ".mp4";

/// Literal prepended to every output file name.
pub const OUTPUT_PREFIX: &str = "cycle_";

/// A validated input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    path: PathBuf,
}

impl InputSpec {
    /// Validate that `path` names an existing, readable regular file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            return Err(CycleError::InputNotFound {
                path: path.display().to_string(),
            });
        }

        // `is_file` follows symlinks, so a link to a regular file is accepted.
        if !path.is_file() {
            return Err(CycleError::InputNotAFile {
                path: path.display().to_string(),
            });
        }

        // Opened and dropped straight away; only readability is checked.
        if let Err(e) = File::open(&path) {
            return Err(CycleError::InputNotReadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            });
        }

        Ok(Self { path })
    }

    /// The path as supplied.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute, symlink-free form of [`InputSpec::path`] for display. Falls
    /// back to the supplied path when it cannot be resolved.
    pub fn resolved_path(&self) -> PathBuf {
        std::fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone())
    }

    /// Base name of the input. Always present for a validated regular file.
    pub fn file_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }
}

/// The output location derived from an [`InputSpec`].
///
/// No collision detection happens here. An existing file at [`OutputSpec::path`]
/// is handed to the engine as-is, and two concurrent runs on the same input
/// race on that same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    stem: OsString,
    suffix_matched: bool,
    path: PathBuf,
}

impl OutputSpec {
    /// Derive the output for `input`, placed inside `output_dir`.
    pub fn derive(input: &InputSpec, output_dir: &Path) -> Self {
        let (stem, suffix_matched) = strip_input_suffix(input.file_name());
        let path = output_dir.join(compose_file_name(stem, suffix_matched));

        Self {
            stem: stem.to_os_string(),
            suffix_matched,
            path,
        }
    }

    /// Full path of the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name with [`INPUT_SUFFIX`] removed, or the whole base name when
    /// the input did not end with it.
    pub fn stem(&self) -> &OsStr {
        &self.stem
    }

    /// Whether the input name ended with [`INPUT_SUFFIX`].
    pub fn suffix_matched(&self) -> bool {
        self.suffix_matched
    }
}

/// Strip exactly one trailing [`INPUT_SUFFIX`]. No match (or a non UTF-8
/// name) leaves the base name untouched.
fn strip_input_suffix(base_name: &OsStr) -> (&OsStr, bool) {
    match base_name.to_str().and_then(|name| name.strip_suffix(INPUT_SUFFIX)) {
        Some(stem) => (OsStr::new(stem), true),
        None => (base_name, false),
    }
}

fn compose_file_name(stem: &OsStr, suffix_matched: bool) -> OsString {
    let mut name = OsString::from(OUTPUT_PREFIX);
    name.push(stem);
    if suffix_matched {
        name.push(INPUT_SUFFIX);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn name(base: &str) -> OsString {
        let (stem, suffix_matched) = strip_input_suffix(OsStr::new(base));
        compose_file_name(stem, suffix_matched)
    }

    #[test]
    fn test_matching_suffix() {
        assert_eq!(name("clip.mp4"), "cycle_clip.mp4");
    }

    #[test]
    fn test_only_trailing_suffix_is_stripped() {
        assert_eq!(name("a.b.mp4"), "cycle_a.b.mp4");
        assert_eq!(name("x.mp4.mp4"), "cycle_x.mp4.mp4");

        let (stem, matched) = strip_input_suffix(OsStr::new("x.mp4.mp4"));
        assert_eq!(stem, "x.mp4");
        assert!(matched);
    }

    #[test]
    fn test_non_matching_suffix_is_kept() {
        assert_eq!(name("clip.mov"), "cycle_clip.mov");
        // Case-sensitive
        assert_eq!(name("clip.MP4"), "cycle_clip.MP4");

        let (stem, matched) = strip_input_suffix(OsStr::new("clip.mov"));
        assert_eq!(stem, "clip.mov");
        assert!(!matched);
    }

    #[test]
    fn test_input_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.mp4");

        let err = InputSpec::new(&missing).unwrap_err();
        assert!(matches!(err, CycleError::InputNotFound { .. }));
        assert!(err.to_string().contains(&missing.display().to_string()));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let err = InputSpec::new(dir.path()).unwrap_err();
        assert!(matches!(err, CycleError::InputNotAFile { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked.mp4");
        std::fs::write(&locked, b"").unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users (root) can still open the file; nothing to check then.
        if File::open(&locked).is_ok() {
            return;
        }

        let err = InputSpec::new(&locked).unwrap_err();
        assert!(matches!(err, CycleError::InputNotReadable { .. }));
        assert!(err.is_precondition());
        assert!(err.user_message().contains(&locked.display().to_string()));
    }

    #[test]
    fn test_resolved_path_is_absolute() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        std::fs::write(&input, b"").unwrap();

        let spec = InputSpec::new(dir.path().join(".").join("clip.mp4")).unwrap();
        assert!(spec.resolved_path().is_absolute());
        assert_eq!(spec.resolved_path(), std::fs::canonicalize(&input).unwrap());
    }

    #[test]
    fn test_output_ignores_input_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("clip.mp4"), b"").unwrap();
        std::fs::write(dir.path().join("clip.mp4"), b"").unwrap();

        let out_dir = Path::new("renders");
        let a = OutputSpec::derive(&InputSpec::new(nested.join("clip.mp4")).unwrap(), out_dir);
        let b = OutputSpec::derive(&InputSpec::new(dir.path().join("clip.mp4")).unwrap(), out_dir);

        assert_eq!(a, b);
        assert_eq!(a.path(), Path::new("renders/cycle_clip.mp4"));
        assert_eq!(a.stem(), "clip");
        assert!(a.suffix_matched());
    }
}
