use alloc::vec;
use alloc::vec::Vec;
use core::mem::size_of;

use liveboot_core::boot::BootVolume;
use liveboot_core::{log_info, log_warn, status};

use super::{
    FileInfoHeader, FileProtocol, LoadedImageProtocol, SimpleFileSystemProtocol,
    EFI_FILE_DIRECTORY, EFI_FILE_MODE_READ, FILE_INFO_GUID, LOADED_IMAGE_PROTOCOL_GUID,
    SIMPLE_FILE_SYSTEM_PROTOCOL_GUID,
};
use crate::uefi::{handle_protocol, to_ucs2};
use crate::BootServices;

/// Files bigger than this are never read into memory whole.
const MAX_READ_BYTES: usize = 1024 * 1024;

/// Get Loaded Image Protocol for our own image
pub unsafe fn get_loaded_image(
    bs: &BootServices,
    image_handle: *mut (),
) -> Result<*mut LoadedImageProtocol, usize> {
    handle_protocol(bs, image_handle, &LOADED_IMAGE_PROTOCOL_GUID)
}

/// Open root directory of the volume behind `device_handle`
pub unsafe fn open_root_volume(
    bs: &BootServices,
    device_handle: *mut (),
) -> Result<*mut FileProtocol, usize> {
    let fs_protocol: *mut SimpleFileSystemProtocol =
        handle_protocol(bs, device_handle, &SIMPLE_FILE_SYSTEM_PROTOCOL_GUID)?;

    let mut root: *mut FileProtocol = core::ptr::null_mut();
    let status = ((*fs_protocol).open_volume)(fs_protocol, &mut root);
    if status != 0 || root.is_null() {
        return Err(status);
    }
    Ok(root)
}

/// Open file for reading only
pub unsafe fn open_file_read(
    root: *mut FileProtocol,
    path: &[u16],
) -> Result<*mut FileProtocol, usize> {
    let mut file: *mut FileProtocol = core::ptr::null_mut();

    let status = ((*root).open)(root, &mut file, path.as_ptr(), EFI_FILE_MODE_READ, 0);
    if status != 0 {
        return Err(status);
    }

    Ok(file)
}

pub unsafe fn close_file(file: *mut FileProtocol) {
    let _ = ((*file).close)(file);
}

/// Size and attributes from EFI_FILE_INFO
pub unsafe fn file_info(file: *mut FileProtocol) -> Result<(u64, u64), usize> {
    // FileInfo header plus room for a long name
    let mut buffer = [0u64; 64];
    let mut size = buffer.len() * size_of::<u64>();
    let status = ((*file).get_info)(
        file,
        &FILE_INFO_GUID,
        &mut size,
        buffer.as_mut_ptr() as *mut u8,
    );
    if status != 0 || size < size_of::<FileInfoHeader>() {
        return Err(status);
    }

    let info = &*(buffer.as_ptr() as *const FileInfoHeader);
    Ok((info.file_size, info.attribute))
}

/// Read `len` bytes from the current position
pub unsafe fn read_exact(file: *mut FileProtocol, len: usize) -> Result<Vec<u8>, usize> {
    let mut data = vec![0u8; len];
    let mut filled = 0;

    while filled < len {
        let mut chunk = len - filled;
        let status = ((*file).read)(file, &mut chunk, data[filled..].as_mut_ptr());
        if status != 0 {
            return Err(status);
        }
        if chunk == 0 {
            // file shrank under us
            data.truncate(filled);
            break;
        }
        filled += chunk;
    }

    Ok(data)
}

/// The volume this image was loaded from
pub struct EspVolume {
    root: *mut FileProtocol,
}

impl EspVolume {
    pub unsafe fn open(bs: &BootServices, device_handle: *mut ()) -> Result<Self, usize> {
        let root = open_root_volume(bs, device_handle)?;
        log_info!("boot volume opened");
        Ok(Self { root })
    }
}

impl BootVolume for EspVolume {
    fn exists(&self, path: &str) -> bool {
        let utf16_path = to_ucs2(path);
        unsafe {
            match open_file_read(self.root, &utf16_path) {
                Ok(file) => {
                    close_file(file);
                    true
                }
                Err(_) => false,
            }
        }
    }

    fn read_file(&self, path: &str) -> Option<Vec<u8>> {
        let utf16_path = to_ucs2(path);
        unsafe {
            let file = match open_file_read(self.root, &utf16_path) {
                Ok(file) => file,
                Err(status) => {
                    log_warn!("open {}: {}", path, status::describe(status));
                    return None;
                }
            };

            let result = match file_info(file) {
                Ok((_, attribute)) if attribute & EFI_FILE_DIRECTORY != 0 => {
                    log_warn!("{} is a directory", path);
                    None
                }
                Ok((file_size, _)) if file_size as usize > MAX_READ_BYTES => {
                    log_warn!("{} too large to read ({} bytes)", path, file_size);
                    None
                }
                Ok((file_size, _)) => match read_exact(file, file_size as usize) {
                    Ok(data) => Some(data),
                    Err(status) => {
                        log_warn!("read {}: {}", path, status::describe(status));
                        None
                    }
                },
                Err(status) => {
                    log_warn!("get_info {}: {}", path, status::describe(status));
                    None
                }
            };

            close_file(file);
            result
        }
    }
}

impl Drop for EspVolume {
    fn drop(&mut self) {
        unsafe { close_file(self.root) };
    }
}
