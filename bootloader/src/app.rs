//! Boot flow from console setup to the hand-off.

use alloc::string::String;

use liveboot_core::status::{self, EFI_LOAD_ERROR, EFI_SUCCESS};
use liveboot_core::{log_error, log_info, prepare, BootChainLauncher, BootLayout, PreparedBoot};

use crate::heap::heap_stats;
use crate::tui::input::Keyboard;
use crate::tui::log_panel::dump_logs_to_screen;
use crate::tui::menu::{MainMenu, MenuAction};
use crate::tui::renderer::{
    Screen, EFI_BLACK, EFI_DARKGRAY, EFI_LIGHTGRAY, EFI_LIGHTGREEN, EFI_RED, EFI_WHITE,
    EFI_YELLOW,
};
use crate::tui::textbox::edit_params;
use crate::uefi::console::enable_text_mode;
use crate::uefi::file_system::{get_loaded_image, EspVolume};
use crate::uefi::image::FirmwarePlatform;
use crate::uefi::variables::RuntimeVariableStore;
use crate::{
    BootServices, RuntimeServices, SimpleTextInputProtocol, SimpleTextOutputProtocol, VERSION,
};

/// Firmware handles the boot flow works with
pub struct Firmware<'a> {
    pub image_handle: *mut (),
    pub boot_services: &'a BootServices,
    pub runtime_services: &'a RuntimeServices,
    pub con_in: *mut SimpleTextInputProtocol,
    pub con_out: *mut SimpleTextOutputProtocol,
}

/// Run the boot flow. Returns the status handed back to the firmware.
pub fn run(fw: Firmware<'_>) -> usize {
    let bs = fw.boot_services;
    let layout = BootLayout::DEFAULT;

    // Not every firmware has Console Control; text output works without it.
    let _ = unsafe { enable_text_mode(bs) };

    let mut screen = Screen::new(fw.con_out);
    let mut keyboard = Keyboard::new(fw.con_in);

    let device_handle = match unsafe { get_loaded_image(bs, fw.image_handle) } {
        Ok(loaded_image) => unsafe { (*loaded_image).device_handle },
        Err(status) => {
            screen.put_line(&alloc::format!(
                "Error: could not find loaded image ({})",
                status::describe(status)
            ));
            return status;
        }
    };

    screen.clear();
    let title = alloc::format!("Welcome to LiveBoot! - Version {}", VERSION);
    screen.put_str_at(2, 1, &title, EFI_WHITE, EFI_BLACK);
    keyboard.reset();
    screen.enable_cursor(false);
    screen.set_color(EFI_LIGHTGRAY, EFI_BLACK);

    let prepared = {
        let volume = match unsafe { EspVolume::open(bs, device_handle) } {
            Ok(volume) => volume,
            Err(status) => {
                log_error!("can't open boot volume: {}", status::describe(status));
                return halt(&mut screen, bs, &layout, &["Can't open the boot volume"]);
            }
        };
        prepare(&volume, &layout)
    };

    let prepared = match prepared {
        Ok(prepared) => prepared,
        Err(errors) => {
            let lines: alloc::vec::Vec<String> =
                errors.iter().map(|e| alloc::format!("{}", e)).collect();
            let lines: alloc::vec::Vec<&str> = lines.iter().map(String::as_str).collect();
            return halt(&mut screen, bs, &layout, &lines);
        }
    };

    if cfg!(feature = "verbose") {
        screen.clear();
        dump_logs_to_screen(&mut screen, 1);
        keyboard.wait_for_key();
    }

    let mut params = String::new();
    let mut menu = MainMenu::new();

    loop {
        match menu.run(&mut screen, &mut keyboard, &title, &params) {
            MenuAction::Boot => {
                log_info!("booting {}", prepared.option.family_name());
                let platform = FirmwarePlatform::new(bs, fw.image_handle, device_handle, &mut screen);
                let store = RuntimeVariableStore::new(fw.runtime_services);
                let mut launcher = BootChainLauncher::new(layout, store, platform);

                // launch only comes back on failure, already reported on screen
                return match launcher.launch(&prepared.option, &params) {
                    Ok(never) => match never {},
                    Err(e) => e.exit_status(),
                };
            }
            MenuAction::EditParams => {
                if edit_params(&mut screen, &mut keyboard, &mut params) {
                    log_info!("kernel parameters set to \"{}\"", params);
                }
            }
            MenuAction::ShowConfig => {
                show_configuration(&mut screen, &prepared, &params);
                keyboard.wait_for_key();
            }
            MenuAction::Exit => {
                log_info!("exit to firmware");
                screen.clear();
                return EFI_SUCCESS;
            }
        }
    }
}

/// Show what is stopping the boot, stall so it can be read, then give up.
fn halt(screen: &mut Screen, bs: &BootServices, layout: &BootLayout, lines: &[&str]) -> usize {
    let mut y = 3;
    screen.put_str_at(2, y, "LiveBoot cannot continue:", EFI_RED, EFI_BLACK);
    for line in lines {
        y += 1;
        screen.put_str_at(4, y, line, EFI_RED, EFI_BLACK);
    }
    dump_logs_to_screen(screen, y + 2);
    let _ = (bs.stall)(layout.failure_stall_us);
    EFI_LOAD_ERROR
}

fn show_configuration(screen: &mut Screen, prepared: &PreparedBoot, params: &str) {
    screen.clear();

    let option = &prepared.option;
    let heap = heap_stats();
    let rows = [
        ("Distribution", String::from(option.family_name())),
        ("Kernel", option.kernel_path.clone()),
        ("Initrd", option.initrd_path.clone()),
        ("Boot folder", option.boot_folder.clone()),
        ("Parameters", String::from(if params.is_empty() { "(none)" } else { params })),
        (
            "Heap",
            alloc::format!(
                "{} KiB used, {} KiB free of {} KiB",
                heap.used / 1024,
                heap.free / 1024,
                heap.total_size / 1024
            ),
        ),
    ];

    screen.put_str_at(2, 1, "=== BOOT CONFIGURATION ===", EFI_LIGHTGREEN, EFI_BLACK);
    let mut y = 3;
    for (label, value) in rows.iter() {
        screen.put_str_at(4, y, &alloc::format!("{:<13}{}", label, value), EFI_LIGHTGRAY, EFI_BLACK);
        y += 1;
    }

    if !prepared.notices.is_empty() {
        y += 1;
        screen.put_str_at(4, y, "Notices:", EFI_YELLOW, EFI_BLACK);
        for notice in &prepared.notices {
            y += 1;
            screen.put_str_at(6, y, &alloc::format!("{}", notice), EFI_YELLOW, EFI_BLACK);
        }
    }

    screen.put_str_at(4, y + 2, "Press any key to return", EFI_DARKGRAY, EFI_BLACK);
}

