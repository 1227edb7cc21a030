//! End-to-end scenarios: boot volume -> prepare -> launch.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::boot::{prepare, BootChainLauncher, BootOption};
use crate::config::parse;
use crate::error::BootError;
use crate::layout::BootLayout;
use crate::status::{EFI_LOAD_ERROR, EFI_NOT_FOUND};
use crate::testing::{MemoryVariableStore, MemoryVolume, ScriptedPlatform};

fn volume_with_config(config: &[u8]) -> MemoryVolume {
    let layout = BootLayout::DEFAULT;
    MemoryVolume::new()
        .with_file(layout.config_path, config)
        .with_file(layout.loader_path, b"MZ\x90\x00")
        .with_file(layout.medium_path, b"\x00CD001")
}

#[test]
fn test_prepare_known_family() {
    let prepared = prepare(&volume_with_config(b"family=Debian\n"), &BootLayout::DEFAULT).unwrap();
    assert_eq!(prepared.option.kernel_path, "/live/vmlinuz");
    assert_eq!(prepared.option.initrd_path, "/live/initrd.img");
    assert_eq!(prepared.option.boot_folder, "live");
    assert!(prepared.notices.is_empty());
    assert!(prepared.report.all_present());
}

#[test]
fn test_prepare_collects_notices() {
    let cfg = b"# generated by the USB writer\nfamily=Mint\nvideo=efifb\ntimeout=10\n";
    let prepared = prepare(&volume_with_config(cfg), &BootLayout::DEFAULT).unwrap();
    assert_eq!(prepared.option.boot_folder, "casper");
    assert_eq!(
        prepared.notices,
        [
            BootError::UnrecognizedOption("video".to_string()),
            BootError::UnrecognizedOption("timeout".to_string()),
        ]
    );
}

#[test]
fn test_missing_loader_never_reaches_menu() {
    let layout = BootLayout::DEFAULT;
    let volume = volume_with_config(b"family=Ubuntu\n").without_file(layout.loader_path);
    let errors = prepare(&volume, &layout).unwrap_err();
    assert_eq!(errors, [BootError::MissingArtifact(layout.loader_path.to_string())]);
    assert!(errors.iter().all(BootError::blocks_menu));
}

#[test]
fn test_all_missing_artifacts_reported_together() {
    let layout = BootLayout::DEFAULT;
    let volume = MemoryVolume::new().with_file(layout.loader_path, b"MZ");
    let errors = prepare(&volume, &layout).unwrap_err();
    assert_eq!(
        errors,
        [
            BootError::MissingArtifact(layout.config_path.to_string()),
            BootError::MissingArtifact(layout.medium_path.to_string()),
        ]
    );
}

#[test]
fn test_missing_artifacts_skip_resolution() {
    let layout = BootLayout::DEFAULT;
    let volume = volume_with_config(b"family=Fedora\n").without_file(layout.medium_path);
    let errors = prepare(&volume, &layout).unwrap_err();
    assert_eq!(errors, [BootError::MissingArtifact(layout.medium_path.to_string())]);
}

#[test]
fn test_empty_configuration_is_unreadable() {
    let layout = BootLayout::DEFAULT;
    assert_eq!(
        prepare(&volume_with_config(b""), &layout).unwrap_err(),
        [BootError::ConfigurationUnreadable]
    );
    assert_eq!(
        prepare(&volume_with_config(b"\n# nothing here\n\n"), &layout).unwrap_err(),
        [BootError::ConfigurationUnreadable]
    );
}

#[test]
fn test_only_unknown_keys_is_unresolved() {
    let errors = prepare(&volume_with_config(b"splash=yes\n"), &BootLayout::DEFAULT).unwrap_err();
    assert_eq!(errors, [BootError::UnresolvedBootTarget]);
    assert_eq!(errors[0].exit_status(), EFI_LOAD_ERROR);
}

#[test]
fn test_unsupported_family_blocks_menu() {
    let errors = prepare(&volume_with_config(b"family=Fedora\n"), &BootLayout::DEFAULT).unwrap_err();
    assert_eq!(errors, [BootError::UnsupportedDistribution("Fedora".to_string())]);
}

#[test]
fn test_parse_then_resolve_is_deterministic() {
    let cfg = b"family=Ubuntu\nkernel=/custom/vmlinuz\ninitrd=/custom/initrd\nroot=custom\n";
    let runs: Vec<BootOption> = (0..3)
        .map(|_| crate::boot::resolve(parse(cfg)).unwrap().option)
        .collect();
    assert!(runs.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(runs[0].kernel_path, "/custom/vmlinuz");
}

#[test]
fn test_prepared_option_persisted_on_failed_launch() {
    let layout = BootLayout::DEFAULT;
    let cfg = b"kernel=/casper/vmlinuz.efi\nfamily=Ubuntu\nroot=casper-persistent\n";
    let prepared = prepare(&volume_with_config(cfg), &layout).unwrap();

    let mut launcher = BootChainLauncher::new(
        layout,
        MemoryVariableStore::new(),
        ScriptedPlatform::failing_load(EFI_NOT_FOUND),
    );
    let err = launcher.launch(&prepared.option, "persistent quiet").unwrap_err();
    assert_eq!(err, BootError::LoadFailed(EFI_NOT_FOUND));
    assert!(!err.blocks_menu());

    let store = launcher.store();
    assert_eq!(store.get(layout.variables.params), Some(&b"persistent quiet\0"[..]));
    // family came after kernel, so the catalog value wins
    assert_eq!(store.get(layout.variables.kernel), Some(&b"/casper/vmlinuz\0"[..]));
    assert_eq!(store.get(layout.variables.initrd), Some(&b"/casper/initrd.lz\0"[..]));
    assert_eq!(store.get(layout.variables.boot_folder), Some(&b"casper-persistent\0"[..]));
}
