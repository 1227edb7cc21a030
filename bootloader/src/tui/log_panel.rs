use liveboot_core::logger::{self, Level};

use crate::tui::renderer::{Screen, EFI_BLACK, EFI_GREEN, EFI_LIGHTGREEN, EFI_RED, EFI_YELLOW};

fn level_color(level: Level) -> usize {
    match level {
        Level::Info => EFI_GREEN,
        Level::Warn => EFI_YELLOW,
        Level::Error => EFI_RED,
    }
}

/// Print the boot log starting at row `start_y`, newest entries last.
///
/// Older entries are skipped when the log does not fit the screen.
pub fn dump_logs_to_screen(screen: &mut Screen, start_y: usize) {
    let logs = logger::get_logs();

    screen.put_str_at(2, start_y, "=== BOOT LOG ===", EFI_LIGHTGREEN, EFI_BLACK);

    let rows = screen.height().saturating_sub(start_y + 2);
    let skip = logs.len().saturating_sub(rows);
    let max_len = screen.width().saturating_sub(12);

    for (i, entry) in logs.iter().skip(skip).enumerate() {
        let y = start_y + 1 + i;
        let msg: &str = &entry.message;
        let msg = match msg.char_indices().nth(max_len) {
            Some((cut, _)) => &msg[..cut],
            None => msg,
        };
        screen.put_str_at(
            4,
            y,
            &alloc::format!("[{}] {}", entry.level.tag(), msg),
            level_color(entry.level),
            EFI_BLACK,
        );
    }

    let dropped = logger::dropped_count();
    if dropped > 0 {
        let y = start_y + 1 + logs.len().min(rows);
        screen.put_str_at(
            4,
            y,
            &alloc::format!("({} later entries not kept)", dropped),
            EFI_YELLOW,
            EFI_BLACK,
        );
    }
}
