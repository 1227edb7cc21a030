//! Artifact Validator
//!
//! Checks that the files the boot chain depends on are on the boot volume.
//! Every path is checked even after a miss, so one pass reports all of
//! them.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::BootError;
use crate::layout::BootLayout;
use crate::{log_error, log_info};

/// Read access to the boot volume.
pub trait BootVolume {
    fn exists(&self, path: &str) -> bool;

    /// Whole file contents, or `None` when it can't be opened or read.
    fn read_file(&self, path: &str) -> Option<Vec<u8>>;
}

impl<V: BootVolume + ?Sized> BootVolume for &V {
    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn read_file(&self, path: &str) -> Option<Vec<u8>> {
        (**self).read_file(path)
    }
}

/// Paths from `paths` that are not on the volume, in input order.
pub fn verify<V: BootVolume + ?Sized>(volume: &V, paths: &[&str]) -> Vec<String> {
    let mut missing = Vec::new();
    for path in paths {
        if volume.exists(path) {
            log_info!("found {}", path);
        } else {
            log_error!("missing {}", path);
            missing.push(path.to_string());
        }
    }
    missing
}

/// Presence of each file in a [`BootLayout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactReport {
    pub config_present: bool,
    pub loader_present: bool,
    pub medium_present: bool,
}

impl ArtifactReport {
    pub fn check<V: BootVolume + ?Sized>(volume: &V, layout: &BootLayout) -> Self {
        let missing = verify(volume, &layout.required_paths());
        let present = |path: &str| !missing.iter().any(|m| m == path);

        Self {
            config_present: present(layout.config_path),
            loader_present: present(layout.loader_path),
            medium_present: present(layout.medium_path),
        }
    }

    pub fn all_present(&self) -> bool {
        self.config_present && self.loader_present && self.medium_present
    }

    /// One `MissingArtifact` per absent file, configuration first.
    pub fn errors(&self, layout: &BootLayout) -> Vec<BootError> {
        [
            (self.config_present, layout.config_path),
            (self.loader_present, layout.loader_path),
            (self.medium_present, layout.medium_path),
        ]
        .into_iter()
        .filter(|(present, _)| !*present)
        .map(|(_, path)| BootError::MissingArtifact(path.to_string()))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryVolume;

    fn full_volume(layout: &BootLayout) -> MemoryVolume {
        MemoryVolume::new()
            .with_file(layout.config_path, b"family=Debian\n")
            .with_file(layout.loader_path, b"MZ")
            .with_file(layout.medium_path, b"CD001")
    }

    #[test]
    fn test_verify_reports_missing_in_order() {
        let volume = MemoryVolume::new().with_file("\\b", b"");
        let missing = verify(&volume, &["\\a", "\\b", "\\c"]);
        assert_eq!(missing, ["\\a", "\\c"]);
    }

    #[test]
    fn test_verify_empty_when_all_present() {
        let layout = BootLayout::DEFAULT;
        let volume = full_volume(&layout);
        assert!(verify(&volume, &layout.required_paths()).is_empty());
        assert!(ArtifactReport::check(&volume, &layout).all_present());
    }

    #[test]
    fn test_every_missing_artifact_reported() {
        let layout = BootLayout::DEFAULT;
        let report = ArtifactReport::check(&MemoryVolume::new(), &layout);
        assert!(!report.all_present());
        assert_eq!(
            report.errors(&layout),
            [
                BootError::MissingArtifact(layout.config_path.to_string()),
                BootError::MissingArtifact(layout.loader_path.to_string()),
                BootError::MissingArtifact(layout.medium_path.to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_loader_blocks_continuation() {
        let layout = BootLayout::DEFAULT;
        let volume = full_volume(&layout).without_file(layout.loader_path);
        let report = ArtifactReport::check(&volume, &layout);
        assert!(report.config_present);
        assert!(!report.loader_present);
        assert!(!report.all_present());
        assert_eq!(
            report.errors(&layout),
            [BootError::MissingArtifact(layout.loader_path.to_string())]
        );
    }

    #[test]
    fn test_missing_config_alone_is_reported() {
        let layout = BootLayout::DEFAULT;
        let volume = full_volume(&layout).without_file(layout.config_path);
        let report = ArtifactReport::check(&volume, &layout);
        assert!(report.loader_present && report.medium_present);
        assert!(!report.all_present());
        assert_eq!(report.errors(&layout).len(), 1);
    }
}
