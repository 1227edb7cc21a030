//! Boot configuration resolution and boot-chain execution.
//!
//! ```text
//! ArtifactValidator ──► ConfigParser ──► resolve ──► (menu) ──► BootChainLauncher
//! ```
//!
//! [`prepare`] runs everything up to the menu; the menu hands the chosen
//! [`BootOption`] and kernel parameters to [`BootChainLauncher::launch`].

pub mod launcher;
pub mod option;
pub mod resolver;
pub mod validator;

pub use launcher::{encode_variable, BootChainLauncher, ImagePlatform, VariableStore};
pub use option::{BootOption, ResolvedLaunchParameters};
pub use resolver::{resolve, Resolution};
pub use validator::{verify, ArtifactReport, BootVolume};

use alloc::vec;
use alloc::vec::Vec;

use crate::config;
use crate::error::BootError;
use crate::layout::BootLayout;
use crate::{log_error, log_info};

/// Everything the menu needs once the boot volume checks out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedBoot {
    pub option: BootOption,
    /// Non-fatal notices to show the operator
    pub notices: Vec<BootError>,
    pub report: ArtifactReport,
}

/// Validate the boot volume, then read, parse and resolve the configuration.
///
/// On failure every blocking error is returned, in the order found: all
/// missing artifacts, or the single configuration error. Resolution is not
/// attempted while the loader or the medium is missing.
pub fn prepare<V: BootVolume + ?Sized>(
    volume: &V,
    layout: &BootLayout,
) -> Result<PreparedBoot, Vec<BootError>> {
    let report = ArtifactReport::check(volume, layout);
    if !report.all_present() {
        return Err(report.errors(layout));
    }

    let resolution = load_configuration(volume, layout).map_err(|e| vec![e])?;
    log_info!(
        "resolved {}: kernel={} initrd={} folder={}",
        resolution.option.family_name(),
        resolution.option.kernel_path,
        resolution.option.initrd_path,
        resolution.option.boot_folder
    );

    Ok(PreparedBoot {
        option: resolution.option,
        notices: resolution.notices,
        report,
    })
}

/// Read and resolve the configuration file. The raw buffer is dropped
/// before this returns.
pub fn load_configuration<V: BootVolume + ?Sized>(
    volume: &V,
    layout: &BootLayout,
) -> crate::error::Result<Resolution> {
    let buffer = match volume.read_file(layout.config_path) {
        Some(buffer) if !buffer.is_empty() => buffer,
        _ => {
            log_error!("can't read {}", layout.config_path);
            return Err(BootError::ConfigurationUnreadable);
        }
    };

    let mut entries = config::parse(&buffer).peekable();
    if entries.peek().is_none() {
        log_error!("{} has no entries", layout.config_path);
        return Err(BootError::ConfigurationUnreadable);
    }

    resolve(entries)
}
