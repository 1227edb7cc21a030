//! Distribution Catalog
//!
//! Known Linux distribution families and where each one keeps its kernel
//! and initrd on a live medium. Adding a family is a data change: append
//! a row to [`CATALOG`].
//!
//! Pure data, no I/O and no mutable state.

/// Boot layout of one distribution family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionMapping {
    /// Name as written after `family=` (case-sensitive)
    pub family_name: &'static str,
    pub kernel_path: &'static str,
    pub initrd_path: &'static str,
    /// Folder convention on the medium ("live", "casper", ...)
    pub boot_folder_tag: &'static str,
}

impl DistributionMapping {
    pub const fn new(
        family_name: &'static str,
        kernel_path: &'static str,
        initrd_path: &'static str,
        boot_folder_tag: &'static str,
    ) -> Self {
        Self {
            family_name,
            kernel_path,
            initrd_path,
            boot_folder_tag,
        }
    }

    /// Whether two families boot from the same files.
    pub fn shares_layout_with(&self, other: &DistributionMapping) -> bool {
        self.kernel_path == other.kernel_path
            && self.initrd_path == other.initrd_path
            && self.boot_folder_tag == other.boot_folder_tag
    }
}

// Debian live media use live/; Ubuntu and its derivatives use casper/.
pub const CATALOG: &[DistributionMapping] = &[
    DistributionMapping::new("Debian", "/live/vmlinuz", "/live/initrd.img", "live"),
    DistributionMapping::new("Ubuntu", "/casper/vmlinuz", "/casper/initrd.lz", "casper"),
    DistributionMapping::new("Mint", "/casper/vmlinuz", "/casper/initrd.lz", "casper"),
];

/// Exact, case-sensitive lookup by family name.
pub fn lookup(family_name: &str) -> Option<&'static DistributionMapping> {
    CATALOG.iter().find(|m| m.family_name == family_name)
}

/// Names of every supported family, in catalog order.
pub fn families() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|m| m.family_name)
}
