// UEFI Simple File System Protocol bindings

pub const SIMPLE_FILE_SYSTEM_PROTOCOL_GUID: [u8; 16] = [
    0x22, 0x5b, 0x4e, 0x96, 0x59, 0x64, 0xd2, 0x11, 0x8e, 0x39, 0x00, 0xa0, 0xc9, 0x69, 0x72, 0x3b,
];

pub const LOADED_IMAGE_PROTOCOL_GUID: [u8; 16] = [
    0xa1, 0x31, 0x1b, 0x5b, 0x62, 0x95, 0xd2, 0x11, 0x8e, 0x3f, 0x00, 0xa0, 0xc9, 0x69, 0x72, 0x3b,
];

pub const FILE_INFO_GUID: [u8; 16] = [
    0x92, 0x6e, 0x57, 0x09, 0x3f, 0x6d, 0xd2, 0x11, 0x8e, 0x39, 0x00, 0xa0, 0xc9, 0x69, 0x72, 0x3b,
];

pub const EFI_FILE_MODE_READ: u64 = 0x0000000000000001;

pub const EFI_FILE_DIRECTORY: u64 = 0x0000000000000010;

#[repr(C)]
pub struct LoadedImageProtocol {
    _revision: u32,
    _parent_handle: *mut (),
    _system_table: *mut (),
    pub device_handle: *mut (),
    _file_path: *mut (),
    _reserved: *mut (),
    _load_options_size: u32,
    _load_options: *mut (),
    _image_base: *mut (),
    _image_size: u64,
    _image_code_type: u32,
    _image_data_type: u32,
    _unload: usize,
}

#[repr(C)]
pub struct SimpleFileSystemProtocol {
    _revision: u64,
    pub open_volume: extern "efiapi" fn(
        this: *mut SimpleFileSystemProtocol,
        root: *mut *mut FileProtocol,
    ) -> usize,
}

#[repr(C)]
pub struct FileProtocol {
    _revision: u64,
    pub open: extern "efiapi" fn(
        this: *mut FileProtocol,
        new_handle: *mut *mut FileProtocol,
        file_name: *const u16,
        open_mode: u64,
        attributes: u64,
    ) -> usize,
    pub close: extern "efiapi" fn(this: *mut FileProtocol) -> usize,
    _delete: usize,
    pub read: extern "efiapi" fn(
        this: *mut FileProtocol,
        buffer_size: *mut usize,
        buffer: *mut u8,
    ) -> usize,
    _write: usize,
    _get_position: usize,
    _set_position: usize,
    pub get_info: extern "efiapi" fn(
        this: *mut FileProtocol,
        information_type: *const [u8; 16],
        buffer_size: *mut usize,
        buffer: *mut u8,
    ) -> usize,
    _set_info: usize,
    _flush: usize,
}

/// Leading fields of EFI_FILE_INFO; the file name follows in the buffer.
#[repr(C)]
pub struct FileInfoHeader {
    _size: u64,
    pub file_size: u64,
    _physical_size: u64,
    _create_time: [u8; 16],
    _last_access_time: [u8; 16],
    _modification_time: [u8; 16],
    pub attribute: u64,
}
