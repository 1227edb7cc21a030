//! Boot Chain Launcher
//!
//! Hands the resolved boot target to the second-stage loader:
//!
//! 1. persist the operator's kernel parameters,
//! 2. persist kernel path, initrd path and boot folder,
//! 3. load the second-stage image,
//! 4. clear the screen and start it.
//!
//! Variables are the only channel to the second stage. Each is the UTF-8
//! text followed by one NUL byte. They are written before the load is
//! attempted and are not rolled back if it fails; the next launch simply
//! overwrites them.
//!
//! A successful start never comes back, so [`BootChainLauncher::launch`]
//! only ever returns an error. Every error it returns has already been
//! reported through the platform and held on screen for the failure stall.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::convert::Infallible;

use uguid::Guid;

use super::option::{BootOption, ResolvedLaunchParameters};
use crate::error::{BootError, Result};
use crate::layout::BootLayout;
use crate::status::{self, EFI_SUCCESS};
use crate::{log_error, log_info, log_warn};

/// Firmware variable storage (`SetVariable`).
pub trait VariableStore {
    fn set(
        &mut self,
        namespace: &Guid,
        name: &str,
        attributes: u32,
        data: &[u8],
    ) -> core::result::Result<(), usize>;
}

/// Image services and the bits of console the launcher needs.
pub trait ImagePlatform {
    type Image;

    fn load_image(&mut self, path: &str) -> core::result::Result<Self::Image, usize>;

    /// Returns only when the image could not be started or gave control back.
    fn start_image(&mut self, image: Self::Image) -> usize;

    fn clear_screen(&mut self);

    fn report(&mut self, message: &str);

    fn stall(&mut self, microseconds: usize);
}

/// NUL-terminated variable payload, sized exactly to the text plus terminator.
pub fn encode_variable(text: &str) -> Vec<u8> {
    let mut data = Vec::with_capacity(text.len() + 1);
    data.extend_from_slice(text.as_bytes());
    data.push(0);
    data
}

pub struct BootChainLauncher<S, P> {
    layout: BootLayout,
    store: S,
    platform: P,
}

impl<S: VariableStore, P: ImagePlatform> BootChainLauncher<S, P> {
    pub fn new(layout: BootLayout, store: S, platform: P) -> Self {
        Self {
            layout,
            store,
            platform,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn into_parts(self) -> (S, P) {
        (self.store, self.platform)
    }

    pub fn launch(&mut self, option: &BootOption, extra_params: &str) -> Result<Infallible> {
        if !option.is_resolved() {
            return Err(self.fail(BootError::UnresolvedBootTarget));
        }

        let params = option.launch_parameters(extra_params);
        self.persist(&params).map_err(|e| self.fail(e))?;

        log_info!("loading {}", self.layout.loader_path);
        let image = match self.platform.load_image(self.layout.loader_path) {
            Ok(image) => image,
            Err(status) => return Err(self.fail(BootError::LoadFailed(status))),
        };

        self.platform.clear_screen();
        log_info!("starting {}", self.layout.loader_path);
        let status = self.platform.start_image(image);

        if status == EFI_SUCCESS {
            log_warn!("second stage returned control");
        }
        Err(self.fail(BootError::StartFailed(status)))
    }

    /// Write all four variables, parameters first.
    pub fn persist(&mut self, params: &ResolvedLaunchParameters<'_>) -> Result<()> {
        let names = self.layout.variables;
        let writes = [
            (names.params, params.raw_cmdline_overrides),
            (names.kernel, params.kernel_path),
            (names.initrd, params.initrd_path),
            (names.boot_folder, params.boot_folder),
        ];

        for (name, value) in writes {
            let data = encode_variable(value);
            match self.store.set(
                &self.layout.namespace,
                name,
                self.layout.variable_attributes,
                &data,
            ) {
                Ok(()) => log_info!("set {} ({} bytes)", name, data.len()),
                Err(status) => {
                    log_error!("set {} failed: {}", name, status::describe(status));
                    return Err(BootError::VariableWrite { name, status });
                }
            }
        }
        Ok(())
    }

    fn fail(&mut self, error: BootError) -> BootError {
        log_error!("{}", error);
        self.platform.report(&error.to_string());
        self.platform.stall(self.layout.failure_stall_us);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{EFI_NOT_FOUND, EFI_OUT_OF_RESOURCES, EFI_SECURITY_VIOLATION};
    use crate::testing::{MemoryVariableStore, PlatformEvent, ScriptedPlatform};
    use alloc::string::{String, ToString};

    fn ubuntu() -> BootOption {
        BootOption {
            distro_family: Some("Ubuntu".to_string()),
            kernel_path: "/casper/vmlinuz".to_string(),
            initrd_path: "/casper/initrd.lz".to_string(),
            boot_folder: "casper".to_string(),
        }
    }

    fn launcher(
        platform: ScriptedPlatform,
    ) -> BootChainLauncher<MemoryVariableStore, ScriptedPlatform> {
        BootChainLauncher::new(BootLayout::DEFAULT, MemoryVariableStore::new(), platform)
    }

    #[test]
    fn test_encode_variable_appends_single_nul() {
        assert_eq!(encode_variable("live"), b"live\0");
        assert_eq!(encode_variable(""), b"\0");
        assert_eq!(encode_variable("/casper/vmlinuz").len(), "/casper/vmlinuz".len() + 1);
    }

    #[test]
    fn test_load_failure_after_all_variables_written() {
        let mut launcher = launcher(ScriptedPlatform::failing_load(EFI_NOT_FOUND));
        let err = launcher.launch(&ubuntu(), "quiet splash").unwrap_err();
        assert_eq!(err, BootError::LoadFailed(EFI_NOT_FOUND));

        let layout = BootLayout::DEFAULT;
        let store = launcher.store();
        assert_eq!(store.get(layout.variables.params), Some(&b"quiet splash\0"[..]));
        assert_eq!(store.get(layout.variables.kernel), Some(&b"/casper/vmlinuz\0"[..]));
        assert_eq!(store.get(layout.variables.initrd), Some(&b"/casper/initrd.lz\0"[..]));
        assert_eq!(store.get(layout.variables.boot_folder), Some(&b"casper\0"[..]));
        assert!(store
            .writes()
            .iter()
            .all(|w| w.namespace == layout.namespace
                && w.attributes == layout.variable_attributes));
    }

    #[test]
    fn test_variables_written_in_order() {
        let mut launcher = launcher(ScriptedPlatform::failing_load(EFI_NOT_FOUND));
        let _ = launcher.launch(&ubuntu(), "");
        let names: Vec<&str> = launcher.store().writes().iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, BootLayout::DEFAULT.variables.all());
    }

    #[test]
    fn test_load_failure_reported_with_stall_and_no_start() {
        let mut launcher = launcher(ScriptedPlatform::failing_load(EFI_NOT_FOUND));
        let _ = launcher.launch(&ubuntu(), "");
        let events = launcher.platform().events();
        assert!(matches!(events[0], PlatformEvent::Load(ref p) if p == "\\efi\\boot\\boot.efi"));
        assert!(matches!(events[1], PlatformEvent::Report(ref m) if m.contains("can't load")));
        assert_eq!(events[2], PlatformEvent::Stall(BootLayout::DEFAULT.failure_stall_us));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_start_failure_clears_screen_first() {
        let mut launcher = launcher(ScriptedPlatform::failing_start(EFI_SECURITY_VIOLATION));
        let err = launcher.launch(&ubuntu(), "nomodeset").unwrap_err();
        assert_eq!(err, BootError::StartFailed(EFI_SECURITY_VIOLATION));

        let events = launcher.platform().events();
        let kinds: Vec<&str> = events.iter().map(PlatformEvent::kind).collect();
        assert_eq!(kinds, ["load", "clear", "start", "report", "stall"]);
        assert_eq!(launcher.store().writes().len(), 4);
    }

    #[test]
    fn test_second_stage_returning_is_a_start_failure() {
        let mut launcher = launcher(ScriptedPlatform::failing_start(EFI_SUCCESS));
        let err = launcher.launch(&ubuntu(), "").unwrap_err();
        assert_eq!(err, BootError::StartFailed(EFI_SUCCESS));
        assert!(status::is_error(err.exit_status()));

        let events = launcher.platform().events();
        assert!(matches!(events[3], PlatformEvent::Report(ref m) if m.contains("returned control")));
    }

    #[test]
    fn test_rejected_variable_aborts_before_load() {
        let store = MemoryVariableStore::new().rejecting("LiveBootInitrd", EFI_OUT_OF_RESOURCES);
        let mut launcher = BootChainLauncher::new(
            BootLayout::DEFAULT,
            store,
            ScriptedPlatform::failing_load(EFI_NOT_FOUND),
        );
        let err = launcher.launch(&ubuntu(), "").unwrap_err();
        assert_eq!(
            err,
            BootError::VariableWrite {
                name: "LiveBootInitrd",
                status: EFI_OUT_OF_RESOURCES
            }
        );
        assert_eq!(launcher.store().writes().len(), 2);

        let events = launcher.platform().events();
        let kinds: Vec<&str> = events.iter().map(PlatformEvent::kind).collect();
        assert_eq!(kinds, ["report", "stall"]);
        assert!(matches!(events[0], PlatformEvent::Report(ref m) if m.contains("LiveBootInitrd")));
        assert_eq!(events[1], PlatformEvent::Stall(BootLayout::DEFAULT.failure_stall_us));
        assert!(status::is_error(err.exit_status()));
    }

    #[test]
    fn test_retry_overwrites_previous_values() {
        let mut launcher = launcher(ScriptedPlatform::failing_load(EFI_NOT_FOUND));
        let _ = launcher.launch(&ubuntu(), "first");

        let mut debian = ubuntu();
        debian.distro_family = Some("Debian".to_string());
        debian.kernel_path = "/live/vmlinuz".to_string();
        let _ = launcher.launch(&debian, "second");

        let store = launcher.store();
        assert_eq!(store.get("LiveBootParams"), Some(&b"second\0"[..]));
        assert_eq!(store.get("LiveBootKernel"), Some(&b"/live/vmlinuz\0"[..]));
        assert_eq!(store.writes().len(), 8);
    }

    #[test]
    fn test_unresolved_option_writes_nothing_but_is_reported() {
        let mut launcher = launcher(ScriptedPlatform::failing_load(EFI_NOT_FOUND));
        let err = launcher.launch(&BootOption::new(), "").unwrap_err();
        assert_eq!(err, BootError::UnresolvedBootTarget);
        let (store, platform) = launcher.into_parts();
        assert!(store.writes().is_empty());
        let kinds: Vec<&str> = platform.events().iter().map(PlatformEvent::kind).collect();
        assert_eq!(kinds, ["report", "stall"]);
    }

    #[test]
    fn test_params_keep_non_ascii_text() {
        let mut launcher = launcher(ScriptedPlatform::failing_load(EFI_NOT_FOUND));
        let params = String::from("locale=de_DE.UTF-8 keyboard=ü");
        let _ = launcher.launch(&ubuntu(), &params);
        let stored = launcher.store().get("LiveBootParams").unwrap();
        assert_eq!(&stored[..stored.len() - 1], params.as_bytes());
        assert_eq!(stored.last(), Some(&0));
    }
}
