//! LiveBoot UEFI Bootloader - Firmware Entry
//!
//! Finds the boot configuration on the USB stick, resolves which kernel
//! and initrd the distribution uses, stores them in firmware variables and
//! chains into the second-stage loader.
//!
//! Firmware tables are declared by hand below; only the services the boot
//! chain calls are typed.

#![no_std]
#![no_main]

extern crate alloc;

use core::panic::PanicInfo;

mod app;
mod heap;
mod tui;
mod uefi;

/// Banner version, major.minor
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION_MAJOR"),
    ".",
    env!("CARGO_PKG_VERSION_MINOR")
);

#[repr(C)]
pub struct SimpleTextInputProtocol {
    reset: extern "efiapi" fn(*mut SimpleTextInputProtocol, bool) -> usize,
    read_key_stroke:
        extern "efiapi" fn(*mut SimpleTextInputProtocol, *mut tui::input::InputKey) -> usize,
}

#[repr(C)]
pub struct SimpleTextOutputMode {
    _max_mode: i32,
    mode: i32,
    _attribute: i32,
    _cursor_column: i32,
    _cursor_row: i32,
    _cursor_visible: bool,
}

#[repr(C)]
pub struct SimpleTextOutputProtocol {
    _reset: usize,
    output_string: extern "efiapi" fn(*mut SimpleTextOutputProtocol, *const u16) -> usize,
    _test_string: usize,
    query_mode:
        extern "efiapi" fn(*mut SimpleTextOutputProtocol, usize, *mut usize, *mut usize) -> usize,
    _set_mode: usize,
    set_attribute: extern "efiapi" fn(*mut SimpleTextOutputProtocol, usize) -> usize,
    clear_screen: extern "efiapi" fn(*mut SimpleTextOutputProtocol) -> usize,
    set_cursor_position: extern "efiapi" fn(*mut SimpleTextOutputProtocol, usize, usize) -> usize,
    enable_cursor: extern "efiapi" fn(*mut SimpleTextOutputProtocol, bool) -> usize,
    mode: *const SimpleTextOutputMode,
}

#[repr(C)]
pub struct SystemTable {
    _header: [u8; 24],
    _firmware_vendor: *const u16,
    _firmware_revision: u32,
    _console_in_handle: *const (),
    con_in: *mut SimpleTextInputProtocol,
    _console_out_handle: *const (),
    con_out: *mut SimpleTextOutputProtocol,
    _stderr_handle: *const (),
    _stderr: *const (),
    runtime_services: *const RuntimeServices,
    boot_services: *const BootServices,
    _number_of_table_entries: usize,
    _configuration_table: *const (),
}

#[repr(C)]
pub struct RuntimeServices {
    _header: [u8; 24],
    // Time Services
    _get_time: usize,
    _set_time: usize,
    _get_wakeup_time: usize,
    _set_wakeup_time: usize,
    // Virtual Memory Services
    _set_virtual_address_map: usize,
    _convert_pointer: usize,
    // Variable Services
    _get_variable: usize,
    _get_next_variable_name: usize,
    pub set_variable: extern "efiapi" fn(
        variable_name: *const u16,
        vendor_guid: *const [u8; 16],
        attributes: u32,
        data_size: usize,
        data: *const u8,
    ) -> usize,
    // Miscellaneous Services
    _get_next_high_monotonic_count: usize,
    _reset_system: usize,
}

#[repr(C)]
pub struct BootServices {
    _header: [u8; 24],
    // Task Priority Services
    _raise_tpl: usize,
    _restore_tpl: usize,
    // Memory Services
    pub allocate_pages: extern "efiapi" fn(
        allocate_type: usize,
        memory_type: usize,
        pages: usize,
        memory: *mut u64,
    ) -> usize,
    _free_pages: usize,
    _get_memory_map: usize,
    _allocate_pool: usize,
    _free_pool: usize,
    // Event & Timer Services
    _create_event: usize,
    _set_timer: usize,
    _wait_for_event: usize,
    _signal_event: usize,
    _close_event: usize,
    _check_event: usize,
    // Protocol Handler Services
    _install_protocol_interface: usize,
    _reinstall_protocol_interface: usize,
    _uninstall_protocol_interface: usize,
    handle_protocol: extern "efiapi" fn(
        handle: *mut (),
        protocol: *const [u8; 16],
        interface: *mut *mut (),
    ) -> usize,
    _reserved: usize,
    _register_protocol_notify: usize,
    _locate_handle: usize,
    _locate_device_path: usize,
    _install_configuration_table: usize,
    // Image Services
    pub load_image: extern "efiapi" fn(
        boot_policy: bool,
        parent_image_handle: *mut (),
        file_path: *const u8,
        source_buffer: *const core::ffi::c_void,
        source_size: usize,
        image_handle: *mut *mut (),
    ) -> usize,
    pub start_image: extern "efiapi" fn(
        image_handle: *mut (),
        exit_data_size: *mut usize,
        exit_data: *mut *mut u16,
    ) -> usize,
    _exit: usize,
    pub unload_image: extern "efiapi" fn(image_handle: *mut ()) -> usize,
    _exit_boot_services: usize,
    // Miscellaneous Services
    _get_next_monotonic_count: usize,
    /// Stall for microseconds
    pub stall: extern "efiapi" fn(microseconds: usize) -> usize,
    _set_watchdog_timer: usize,
    // Driver Support Services
    _connect_controller: usize,
    _disconnect_controller: usize,
    // Open/Close Protocol Services
    _open_protocol: usize,
    _close_protocol: usize,
    _open_protocol_information: usize,
    // Library Services
    _protocols_per_handle: usize,
    _locate_handle_buffer: usize,
    pub locate_protocol: extern "efiapi" fn(
        protocol: *const [u8; 16],
        registration: *const (),
        interface: *mut *mut (),
    ) -> usize,
    _install_multiple_protocol_interfaces: usize,
    _uninstall_multiple_protocol_interfaces: usize,
}

#[no_mangle]
pub extern "efiapi" fn efi_main(image_handle: *mut (), system_table: *const ()) -> usize {
    unsafe {
        let st = &*(system_table as *const SystemTable);
        let bs = &*st.boot_services;
        let rt = &*st.runtime_services;

        if let Err(status) = heap::init_heap(bs) {
            return status;
        }

        app::run(app::Firmware {
            image_handle,
            boot_services: bs,
            runtime_services: rt,
            con_in: st.con_in,
            con_out: st.con_out,
        })
    }
}

#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    loop {
        core::hint::spin_loop();
    }
}
