use crate::tui::input::{Keyboard, KEY_ENTER, SCAN_DOWN, SCAN_ESC, SCAN_UP};
use crate::tui::renderer::{Screen, EFI_BLACK, EFI_DARKGRAY, EFI_LIGHTGRAY, EFI_WHITE};

// Box width (inner content is 59 chars)
const BOX_WIDTH: usize = 61;
const INNER_WIDTH: usize = BOX_WIDTH - 2;
const TOP_BORDER: &str = "+===========================================================+";
const DIVIDER: &str = "+-----------------------------------------------------------+";
const EMPTY_LINE: &str = "|                                                           |";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Boot,
    EditParams,
    ShowConfig,
    Exit,
}

pub struct MenuItem {
    pub label: &'static str,
    pub action: MenuAction,
}

pub struct MainMenu {
    selected_index: usize,
    menu_items: [MenuItem; 4],
}

impl MainMenu {
    pub fn new() -> Self {
        Self {
            selected_index: 0,
            menu_items: [
                MenuItem {
                    label: "Boot Linux from USB",
                    action: MenuAction::Boot,
                },
                MenuItem {
                    label: "Edit kernel parameters",
                    action: MenuAction::EditParams,
                },
                MenuItem {
                    label: "Show boot configuration",
                    action: MenuAction::ShowConfig,
                },
                MenuItem {
                    label: "Exit to firmware",
                    action: MenuAction::Exit,
                },
            ],
        }
    }

    pub fn select_next(&mut self) {
        if self.selected_index < self.menu_items.len() - 1 {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    fn boxed(screen: &mut Screen, x: usize, y: usize, text: &str, fg: usize) {
        let padding = INNER_WIDTH.saturating_sub(text.len()) / 2;
        screen.put_str_at(x, y, EMPTY_LINE, EFI_LIGHTGRAY, EFI_BLACK);
        screen.put_str_at(x + 1 + padding, y, text, fg, EFI_BLACK);
    }

    pub fn render(&self, screen: &mut Screen, title: &str, params: &str) {
        // border, title, divider, items with gaps, divider, params, help, border
        let total_height = 3 + self.menu_items.len() * 2 + 1 + 1 + 2 + 1;
        let x = screen.center_x(BOX_WIDTH);
        let mut y = screen.center_y(total_height);

        screen.put_str_at(x, y, TOP_BORDER, EFI_LIGHTGRAY, EFI_BLACK);
        y += 1;
        Self::boxed(screen, x, y, title, EFI_WHITE);
        y += 1;
        screen.put_str_at(x, y, DIVIDER, EFI_LIGHTGRAY, EFI_BLACK);
        y += 1;

        for (i, item) in self.menu_items.iter().enumerate() {
            Self::boxed(screen, x, y, "", EFI_BLACK);
            y += 1;
            let (text, fg) = if i == self.selected_index {
                (alloc::format!(">> {} <<", item.label), EFI_WHITE)
            } else {
                (alloc::format!("   {}   ", item.label), EFI_LIGHTGRAY)
            };
            Self::boxed(screen, x, y, &text, fg);
            y += 1;
        }

        Self::boxed(screen, x, y, "", EFI_BLACK);
        y += 1;
        screen.put_str_at(x, y, DIVIDER, EFI_LIGHTGRAY, EFI_BLACK);
        y += 1;

        let shown = if params.is_empty() { "(none)" } else { params };
        let mut line = alloc::format!("Kernel parameters: {}", shown);
        if line.len() > INNER_WIDTH - 2 {
            line.truncate(INNER_WIDTH - 5);
            line.push_str("...");
        }
        Self::boxed(screen, x, y, &line, EFI_DARKGRAY);
        y += 1;
        Self::boxed(
            screen,
            x,
            y,
            "[UP/DOWN] Navigate  [ENTER] Select  [ESC] Exit",
            EFI_DARKGRAY,
        );
        y += 1;
        screen.put_str_at(x, y, TOP_BORDER, EFI_LIGHTGRAY, EFI_BLACK);
    }

    /// Show the menu until the operator picks an action.
    pub fn run(
        &mut self,
        screen: &mut Screen,
        keyboard: &mut Keyboard,
        title: &str,
        params: &str,
    ) -> MenuAction {
        screen.clear();
        loop {
            self.render(screen, title, params);

            let key = keyboard.wait_for_key();
            match key.scan_code {
                SCAN_UP => self.select_prev(),
                SCAN_DOWN => self.select_next(),
                SCAN_ESC => return MenuAction::Exit,
                _ if key.unicode_char == KEY_ENTER => {
                    return self.menu_items[self.selected_index].action;
                }
                _ => {}
            }
        }
    }
}
