//! Boot Option Resolver
//!
//! Folds configuration entries into a [`BootOption`], in file order:
//!
//! - `family` seeds kernel, initrd and boot folder from the catalog at the
//!   point it is seen, overwriting whatever was there.
//! - `kernel`, `initrd` and `root` overwrite a single field.
//! - Anything else becomes an unrecognized-option notice.
//!
//! Only the last write to each field survives, so a manual key after
//! `family` wins and a `family` after a manual key wins.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::option::BootOption;
use crate::config::ConfigEntry;
use crate::distro::catalog;
use crate::error::{BootError, Result};
use crate::{log_error, log_info, log_warn};

pub const KEY_FAMILY: &str = "family";
pub const KEY_KERNEL: &str = "kernel";
pub const KEY_INITRD: &str = "initrd";
pub const KEY_ROOT: &str = "root";

/// Successful resolution plus the non-fatal notices raised on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub option: BootOption,
    /// `BootError::UnrecognizedOption` for every key the resolver ignored
    pub notices: Vec<BootError>,
}

pub fn resolve<'a, I>(entries: I) -> Result<Resolution>
where
    I: IntoIterator<Item = ConfigEntry<'a>>,
{
    let mut option = BootOption::new();
    let mut notices = Vec::new();

    for entry in entries {
        match entry.key {
            KEY_FAMILY => {
                let Some(mapping) = catalog::lookup(entry.value) else {
                    log_error!("unsupported distribution family: {}", entry.value);
                    return Err(BootError::UnsupportedDistribution(entry.value.to_string()));
                };
                log_info!("family {} -> {}", mapping.family_name, mapping.boot_folder_tag);
                option.distro_family = Some(mapping.family_name.to_string());
                overwrite(&mut option.kernel_path, mapping.kernel_path);
                overwrite(&mut option.initrd_path, mapping.initrd_path);
                overwrite(&mut option.boot_folder, mapping.boot_folder_tag);
            }
            KEY_KERNEL => {
                log_info!("kernel override: {}", entry.value);
                overwrite(&mut option.kernel_path, entry.value);
            }
            KEY_INITRD => {
                log_info!("initrd override: {}", entry.value);
                overwrite(&mut option.initrd_path, entry.value);
            }
            KEY_ROOT => {
                log_info!("boot folder override: {}", entry.value);
                overwrite(&mut option.boot_folder, entry.value);
            }
            other => {
                log_warn!("unrecognized option: {}", other);
                notices.push(BootError::UnrecognizedOption(other.to_string()));
            }
        }
    }

    if !option.is_resolved() {
        log_error!("no kernel/initrd after resolution");
        return Err(BootError::UnresolvedBootTarget);
    }

    Ok(Resolution { option, notices })
}

fn overwrite(field: &mut String, value: &str) {
    field.clear();
    field.push_str(value);
}
