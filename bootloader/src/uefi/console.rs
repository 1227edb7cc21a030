// Legacy Console Control protocol
//
// Some Apple and older firmwares boot with the console in graphics mode;
// text output stays invisible until the screen is switched to text.

use liveboot_core::log_info;

use crate::BootServices;

pub const EFI_CONSOLE_CONTROL_PROTOCOL_GUID: [u8; 16] = [
    0x82, 0x77, 0x2f, 0xf4, 0x2e, 0x01, 0x12, 0x4c, 0x99, 0x56, 0x49, 0xf9, 0x43, 0x04, 0xf7, 0x21,
];

/// EfiConsoleControlScreenText
const SCREEN_MODE_TEXT: u32 = 0;

#[repr(C)]
pub struct ConsoleControlProtocol {
    _get_mode: usize,
    set_mode: extern "efiapi" fn(this: *mut ConsoleControlProtocol, mode: u32) -> usize,
    _lock_std_in: usize,
}

/// Switch the console to text mode when the firmware has the protocol.
pub unsafe fn enable_text_mode(bs: &BootServices) -> Result<(), usize> {
    let mut protocol: *mut () = core::ptr::null_mut();
    let status = (bs.locate_protocol)(
        &EFI_CONSOLE_CONTROL_PROTOCOL_GUID,
        core::ptr::null(),
        &mut protocol,
    );
    if status != 0 || protocol.is_null() {
        log_info!("no console control protocol");
        return Err(status);
    }

    let control = protocol as *mut ConsoleControlProtocol;
    let status = ((*control).set_mode)(control, SCREEN_MODE_TEXT);
    if status != 0 {
        return Err(status);
    }
    log_info!("console switched to text mode");
    Ok(())
}
