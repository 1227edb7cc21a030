pub mod console;
pub mod device_path;
pub mod file_system;
pub mod image;
pub mod variables;

/// Ask the firmware for `protocol` on `handle`.
///
/// # Safety
/// `bs` must be the live boot services table and `handle` a valid handle.
pub unsafe fn handle_protocol<T>(
    bs: &crate::BootServices,
    handle: *mut (),
    protocol: &[u8; 16],
) -> Result<*mut T, usize> {
    let mut interface: *mut () = core::ptr::null_mut();
    let status = (bs.handle_protocol)(handle, protocol, &mut interface);
    if status != 0 || interface.is_null() {
        return Err(status);
    }
    Ok(interface as *mut T)
}

/// NUL-terminated UCS-2 copy of `text`. Characters outside the BMP become '?'.
pub fn to_ucs2(text: &str) -> alloc::vec::Vec<u16> {
    text.chars()
        .map(|ch| if (ch as u32) <= 0xFFFF { ch as u16 } else { b'?' as u16 })
        .chain(core::iter::once(0))
        .collect()
}
