//! Output directory and per-request artifact naming.
//!
//! Each request writes its figure under a name derived from the request
//! content, so two different requests never race on one file. The constant
//! legacy name is still available through `ArtifactId::fixed()`; with it the
//! last writer wins.

use std::fs::create_dir_all;
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::error::{AppError, ErrorKind};

/// Default output directory (relative to the working directory).
pub const DEFAULT_OUTPUT_DIR: &str = "static/plots";

/// Legacy constant artifact name shared by every request.
pub const FIXED_PLOT_FILENAME: &str = "LTI-PLOTS.svg";

/// A directory that exists and receives plot artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Create the directory (idempotent). Call once before handling requests.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root = root.into();
        create_dir_all(&root).map_err(|e| {
            AppError::new(
                ErrorKind::Config,
                format!("Failed to create output directory '{}': {e}", root.display()),
            )
        })?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn artifact_path(&self, id: &ArtifactId) -> PathBuf {
        self.root.join(id.filename())
    }
}

/// File name of one rendered figure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// The shared legacy name (`LTI-PLOTS.svg`).
    pub fn fixed() -> Self {
        Self(FIXED_PLOT_FILENAME.to_string())
    }

    /// Content-derived name: identical requests map to the same file, distinct ones never collide in practice.
    pub fn for_request(numerator: &[f64], denominator: &[f64], time_bound: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"num");
        hasher.update((numerator.len() as u64).to_le_bytes());
        for v in numerator {
            hasher.update(v.to_bits().to_le_bytes());
        }
        hasher.update(b"den");
        hasher.update((denominator.len() as u64).to_le_bytes());
        for v in denominator {
            hasher.update(v.to_bits().to_le_bytes());
        }
        hasher.update(b"t");
        hasher.update(time_bound.to_le_bytes());
        let digest = hasher.finalize();

        let hex: String = digest.iter().take(8).map(|b| format!("{b:02x}")).collect();
        Self(format!("lti-{hex}.svg"))
    }

    pub fn filename(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Write `bytes` to `path` through a temp file in the same directory and rename it into place.
///
/// Readers observe either the previous file or the complete new one.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("static").join("plots");
        let a = OutputDir::init(&nested).unwrap();
        let b = OutputDir::init(&nested).unwrap();
        assert_eq!(a, b);
        assert!(nested.is_dir());
    }

    #[test]
    fn request_ids_are_stable_and_distinct() {
        let a = ArtifactId::for_request(&[1.0], &[1.0, 1.0], 10);
        let b = ArtifactId::for_request(&[1.0], &[1.0, 1.0], 10);
        let c = ArtifactId::for_request(&[1.0], &[1.0, 1.0], 11);
        let d = ArtifactId::for_request(&[1.0, 1.0], &[1.0], 10);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert!(a.filename().starts_with("lti-") && a.filename().ends_with(".svg"));
        assert_eq!(ArtifactId::fixed().filename(), "LTI-PLOTS.svg");
    }

    #[test]
    fn list_boundaries_are_part_of_the_id() {
        // `w` is the bytes "den" followed by the low five bytes of `y`, and `y` ends in "den":
        // without length prefixes both requests hash the same byte stream.
        let y = f64::from_bits(7_954_874_542_860_533_760);
        let w = f64::from_bits(4_611_686_018_434_622_820);
        assert!(y.is_finite() && w.is_finite());
        let a = ArtifactId::for_request(&[1.0], &[y, 1.0], 10);
        let b = ArtifactId::for_request(&[1.0, w], &[1.0], 10);
        assert_ne!(a, b);
    }

    #[test]
    fn atomic_write_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.svg");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }
}
