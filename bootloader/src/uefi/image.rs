//! Image services for the boot chain launcher.

use liveboot_core::boot::ImagePlatform;
use liveboot_core::log_error;
use liveboot_core::status::EFI_LOAD_ERROR;

use crate::tui::renderer::{Screen, EFI_BLACK, EFI_RED};
use crate::uefi::device_path::file_device_path;
use crate::BootServices;

/// Row where launch failures are printed
const REPORT_ROW: usize = 4;

pub struct FirmwarePlatform<'a> {
    bs: &'a BootServices,
    image_handle: *mut (),
    device_handle: *mut (),
    screen: &'a mut Screen,
}

impl<'a> FirmwarePlatform<'a> {
    pub fn new(
        bs: &'a BootServices,
        image_handle: *mut (),
        device_handle: *mut (),
        screen: &'a mut Screen,
    ) -> Self {
        Self {
            bs,
            image_handle,
            device_handle,
            screen,
        }
    }
}

impl ImagePlatform for FirmwarePlatform<'_> {
    type Image = *mut ();

    fn load_image(&mut self, path: &str) -> Result<*mut (), usize> {
        unsafe {
            let device_path = file_device_path(self.bs, self.device_handle, path).map_err(|status| {
                log_error!("no device path for {}", path);
                status
            })?;

            let mut loaded: *mut () = core::ptr::null_mut();
            let status = (self.bs.load_image)(
                false,
                self.image_handle,
                device_path.as_ptr(),
                core::ptr::null(),
                0,
                &mut loaded,
            );
            if status != 0 {
                return Err(status);
            }
            if loaded.is_null() {
                return Err(EFI_LOAD_ERROR);
            }
            Ok(loaded)
        }
    }

    fn start_image(&mut self, image: *mut ()) -> usize {
        let status = (self.bs.start_image)(image, core::ptr::null_mut(), core::ptr::null_mut());
        // Only reached if the image failed or exited; drop it either way.
        let _ = (self.bs.unload_image)(image);
        status
    }

    fn clear_screen(&mut self) {
        self.screen.clear();
    }

    fn report(&mut self, message: &str) {
        self.screen.put_str_at(2, REPORT_ROW, message, EFI_RED, EFI_BLACK);
    }

    fn stall(&mut self, microseconds: usize) {
        let _ = (self.bs.stall)(microseconds);
    }
}
