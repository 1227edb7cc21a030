//! Device paths for LoadImage
//!
//! A file on the boot volume is addressed as the volume's own device path
//! with a Media/File Path node and an End node appended.

use alloc::vec::Vec;
use core::mem::size_of;

use crate::uefi::{handle_protocol, to_ucs2};
use crate::BootServices;

pub const EFI_DEVICE_PATH_PROTOCOL_GUID: [u8; 16] = [
    0x91, 0x6e, 0x57, 0x09, 0x3f, 0x6d, 0xd2, 0x11, 0x8e, 0x39, 0x00, 0xa0, 0xc9, 0x69, 0x72, 0x3b,
];

const EFI_MEDIA_DEVICE_PATH_TYPE: u8 = 0x04;
const EFI_FILE_PATH_DEVICE_PATH_SUBTYPE: u8 = 0x04;
const EFI_END_DEVICE_PATH_TYPE: u8 = 0x7f;
const EFI_END_ENTIRE_DEVICE_PATH_SUBTYPE: u8 = 0xff;

/// Upper bound on nodes walked, in case of a malformed path
const MAX_NODES: usize = 64;

#[repr(C)]
struct DevicePathHeader {
    r#type: u8,
    sub_type: u8,
    length: [u8; 2],
}

const HEADER_LEN: usize = size_of::<DevicePathHeader>();

fn push_node(path: &mut Vec<u8>, r#type: u8, sub_type: u8, payload: &[u8]) {
    let len = (HEADER_LEN + payload.len()) as u16;
    path.push(r#type);
    path.push(sub_type);
    path.extend_from_slice(&len.to_le_bytes());
    path.extend_from_slice(payload);
}

/// Append a file path node for `file` and terminate the path.
pub fn append_file_node(mut path: Vec<u8>, file: &str) -> Vec<u8> {
    let payload: Vec<u8> = to_ucs2(file)
        .into_iter()
        .flat_map(|unit| unit.to_le_bytes())
        .collect();
    push_node(
        &mut path,
        EFI_MEDIA_DEVICE_PATH_TYPE,
        EFI_FILE_PATH_DEVICE_PATH_SUBTYPE,
        &payload,
    );
    push_node(
        &mut path,
        EFI_END_DEVICE_PATH_TYPE,
        EFI_END_ENTIRE_DEVICE_PATH_SUBTYPE,
        &[],
    );
    path
}

/// Copy the nodes of a firmware device path, without its End node.
///
/// # Safety
/// `start` must point to a well-formed, End-terminated device path.
pub unsafe fn copy_nodes(start: *const u8) -> Result<Vec<u8>, usize> {
    let mut nodes = Vec::new();
    let mut current = start;

    for _ in 0..MAX_NODES {
        let header = &*(current as *const DevicePathHeader);
        let len = u16::from_le_bytes(header.length) as usize;

        if header.r#type == EFI_END_DEVICE_PATH_TYPE
            && header.sub_type == EFI_END_ENTIRE_DEVICE_PATH_SUBTYPE
        {
            return Ok(nodes);
        }
        if len < HEADER_LEN {
            return Err(liveboot_core::status::EFI_INVALID_PARAMETER);
        }

        nodes.extend_from_slice(core::slice::from_raw_parts(current, len));
        current = current.add(len);
    }

    Err(liveboot_core::status::EFI_INVALID_PARAMETER)
}

/// Full device path of `file` on the volume behind `device_handle`.
///
/// # Safety
/// `bs` must be the live boot services table.
pub unsafe fn file_device_path(
    bs: &BootServices,
    device_handle: *mut (),
    file: &str,
) -> Result<Vec<u8>, usize> {
    let device_path: *mut u8 = handle_protocol(bs, device_handle, &EFI_DEVICE_PATH_PROTOCOL_GUID)?;
    let nodes = copy_nodes(device_path)?;
    Ok(append_file_node(nodes, file))
}
