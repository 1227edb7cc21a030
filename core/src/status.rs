//! Firmware status codes
//!
//! Statuses stay raw `usize` values the way the firmware returns them;
//! this module only names the ones the boot chain reports.

use core::mem::size_of;

pub const EFI_SUCCESS: usize = 0;
pub const EFI_ERROR_BIT: usize = 1usize << (size_of::<usize>() * 8 - 1);

pub const EFI_LOAD_ERROR: usize = EFI_ERROR_BIT | 1;
pub const EFI_INVALID_PARAMETER: usize = EFI_ERROR_BIT | 2;
pub const EFI_UNSUPPORTED: usize = EFI_ERROR_BIT | 3;
pub const EFI_BUFFER_TOO_SMALL: usize = EFI_ERROR_BIT | 5;
pub const EFI_NOT_READY: usize = EFI_ERROR_BIT | 6;
pub const EFI_DEVICE_ERROR: usize = EFI_ERROR_BIT | 7;
pub const EFI_WRITE_PROTECTED: usize = EFI_ERROR_BIT | 8;
pub const EFI_OUT_OF_RESOURCES: usize = EFI_ERROR_BIT | 9;
pub const EFI_NOT_FOUND: usize = EFI_ERROR_BIT | 14;
pub const EFI_ACCESS_DENIED: usize = EFI_ERROR_BIT | 15;
pub const EFI_ABORTED: usize = EFI_ERROR_BIT | 21;
pub const EFI_SECURITY_VIOLATION: usize = EFI_ERROR_BIT | 26;

pub const fn is_error(status: usize) -> bool {
    status & EFI_ERROR_BIT != 0
}

/// Short operator-facing name for a status code.
pub fn describe(status: usize) -> &'static str {
    match status {
        EFI_SUCCESS => "success",
        EFI_LOAD_ERROR => "load error",
        EFI_INVALID_PARAMETER => "invalid parameter",
        EFI_UNSUPPORTED => "unsupported",
        EFI_BUFFER_TOO_SMALL => "buffer too small",
        EFI_NOT_READY => "not ready",
        EFI_DEVICE_ERROR => "device error",
        EFI_WRITE_PROTECTED => "write protected",
        EFI_OUT_OF_RESOURCES => "out of resources",
        EFI_NOT_FOUND => "not found",
        EFI_ACCESS_DENIED => "access denied",
        EFI_ABORTED => "aborted",
        EFI_SECURITY_VIOLATION => "security violation",
        s if is_error(s) => "firmware error",
        _ => "warning",
    }
}
