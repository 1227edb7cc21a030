use alloc::string::String;

/// Boot target produced by resolving one configuration file.
///
/// Created fresh per resolution and owned by the caller; nothing caches it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootOption {
    pub distro_family: Option<String>,
    pub kernel_path: String,
    pub initrd_path: String,
    pub boot_folder: String,
}

impl BootOption {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both paths the second stage needs are present.
    pub fn is_resolved(&self) -> bool {
        !self.kernel_path.is_empty() && !self.initrd_path.is_empty()
    }

    pub fn family_name(&self) -> &str {
        self.distro_family.as_deref().unwrap_or("(manual)")
    }

    /// Borrow the fields the launcher persists, plus the operator's extra
    /// kernel parameters.
    pub fn launch_parameters<'a>(&'a self, extra_params: &'a str) -> ResolvedLaunchParameters<'a> {
        ResolvedLaunchParameters {
            kernel_path: &self.kernel_path,
            initrd_path: &self.initrd_path,
            boot_folder: &self.boot_folder,
            raw_cmdline_overrides: extra_params,
        }
    }
}

/// What actually gets written to firmware variables for one launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLaunchParameters<'a> {
    pub kernel_path: &'a str,
    pub initrd_path: &'a str,
    pub boot_folder: &'a str,
    pub raw_cmdline_overrides: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_empty_option_is_unresolved() {
        let option = BootOption::new();
        assert!(!option.is_resolved());
        assert_eq!(option.family_name(), "(manual)");
    }

    #[test]
    fn test_needs_both_kernel_and_initrd() {
        let mut option = BootOption::new();
        option.kernel_path = "/casper/vmlinuz".to_string();
        assert!(!option.is_resolved());
        option.initrd_path = "/casper/initrd.lz".to_string();
        assert!(option.is_resolved());
    }

    #[test]
    fn test_launch_parameters_borrow_fields() {
        let option = BootOption {
            distro_family: Some("Debian".to_string()),
            kernel_path: "/live/vmlinuz".to_string(),
            initrd_path: "/live/initrd.img".to_string(),
            boot_folder: "live".to_string(),
        };
        let params = option.launch_parameters("quiet splash");
        assert_eq!(params.kernel_path, "/live/vmlinuz");
        assert_eq!(params.initrd_path, "/live/initrd.img");
        assert_eq!(params.boot_folder, "live");
        assert_eq!(params.raw_cmdline_overrides, "quiet splash");
    }
}
