//! Boot layout
//!
//! Fixed locations on the boot volume and the firmware variables shared
//! with the second-stage loader. The second stage reads the same
//! namespace and names, so changing any of these is a wire change.

use uguid::{guid, Guid};

/// Private namespace for every variable the launcher writes.
pub const LIVEBOOT_VARIABLE_GUID: Guid = guid!("4c69b7e2-6a1d-4f3b-9b58-2e7c1d0a5f31");

pub const EFI_VARIABLE_NON_VOLATILE: u32 = 0x0000_0001;
pub const EFI_VARIABLE_BOOTSERVICE_ACCESS: u32 = 0x0000_0002;
pub const EFI_VARIABLE_RUNTIME_ACCESS: u32 = 0x0000_0004;

/// Names of the four variables, in the order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableNames {
    pub params: &'static str,
    pub kernel: &'static str,
    pub initrd: &'static str,
    pub boot_folder: &'static str,
}

impl VariableNames {
    pub const fn all(&self) -> [&'static str; 4] {
        [self.params, self.kernel, self.initrd, self.boot_folder]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootLayout {
    /// `key=value` boot configuration
    pub config_path: &'static str,
    /// Second-stage loader started at the end of the chain
    pub loader_path: &'static str,
    /// Bootable medium image the second stage mounts
    pub medium_path: &'static str,
    pub namespace: Guid,
    pub variables: VariableNames,
    pub variable_attributes: u32,
    /// How long a launch failure stays on screen
    pub failure_stall_us: usize,
}

impl BootLayout {
    pub const DEFAULT: Self = Self {
        config_path: "\\efi\\boot\\.liveboot.cfg",
        loader_path: "\\efi\\boot\\boot.efi",
        medium_path: "\\efi\\boot\\boot.iso",
        namespace: LIVEBOOT_VARIABLE_GUID,
        variables: VariableNames {
            params: "LiveBootParams",
            kernel: "LiveBootKernel",
            initrd: "LiveBootInitrd",
            boot_folder: "LiveBootFolder",
        },
        variable_attributes: EFI_VARIABLE_NON_VOLATILE
            | EFI_VARIABLE_BOOTSERVICE_ACCESS
            | EFI_VARIABLE_RUNTIME_ACCESS,
        failure_stall_us: 3_000_000,
    };

    /// Paths the validator checks, configuration first.
    pub const fn required_paths(&self) -> [&'static str; 3] {
        [self.config_path, self.loader_path, self.medium_path]
    }
}

impl Default for BootLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}
