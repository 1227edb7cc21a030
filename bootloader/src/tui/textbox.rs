use alloc::string::String;

use crate::tui::input::{Keyboard, KEY_BACKSPACE, KEY_ENTER, SCAN_ESC};
use crate::tui::renderer::{Screen, EFI_BLACK, EFI_DARKGRAY, EFI_GREEN, EFI_LIGHTGREEN, EFI_WHITE};

/// Longest parameter string accepted from the keyboard.
pub const MAX_PARAMS: usize = 255;

pub struct TextBox {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    buffer: [u8; MAX_PARAMS],
    length: usize,
}

impl TextBox {
    pub fn new(x: usize, y: usize, width: usize) -> Self {
        Self {
            x,
            y,
            width: width.max(4),
            buffer: [0u8; MAX_PARAMS],
            length: 0,
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        for b in text.bytes() {
            self.add_char(b);
        }
        self
    }

    /// Printable ASCII only; anything else is ignored.
    pub fn add_char(&mut self, ch: u8) {
        if !(0x20..0x7f).contains(&ch) {
            return;
        }
        if self.length < self.buffer.len() {
            self.buffer[self.length] = ch;
            self.length += 1;
        }
    }

    pub fn backspace(&mut self) {
        if self.length > 0 {
            self.length -= 1;
            self.buffer[self.length] = 0;
        }
    }

    pub fn get_text(&self) -> &str {
        core::str::from_utf8(&self.buffer[..self.length]).unwrap_or("")
    }

    pub fn render(&self, screen: &mut Screen) {
        let visible = self.width - 2;
        // keep the tail in view once the text outgrows the box
        let start = self.length.saturating_sub(visible - 1);
        let shown = &self.get_text()[start..];

        let mut line = String::with_capacity(self.width);
        line.push('[');
        line.push_str(shown);
        for _ in shown.len()..visible {
            line.push(' ');
        }
        line.push(']');

        screen.put_str_at(self.x, self.y, &line, EFI_BLACK, EFI_LIGHTGREEN);
        screen.put_str_at(
            self.x,
            self.y + 1,
            &alloc::format!("{:>3}/{}", self.length, MAX_PARAMS),
            EFI_DARKGRAY,
            EFI_BLACK,
        );
    }
}

/// Edit the extra kernel parameters in place.
///
/// Enter keeps the edited text, Esc leaves `params` untouched.
pub fn edit_params(screen: &mut Screen, keyboard: &mut Keyboard, params: &mut String) -> bool {
    let width = screen.width().saturating_sub(8).min(72);
    let x = screen.center_x(width);
    let y = screen.center_y(6);

    screen.clear();
    screen.put_str_at(x, y, "Edit kernel parameters", EFI_WHITE, EFI_BLACK);
    screen.put_str_at(
        x,
        y + 1,
        "Appended to the distribution's default command line.",
        EFI_GREEN,
        EFI_BLACK,
    );
    screen.put_str_at(
        x,
        y + 5,
        "[ENTER] Accept  [ESC] Cancel  [BACKSPACE] Delete",
        EFI_DARKGRAY,
        EFI_BLACK,
    );

    let mut textbox = TextBox::new(x, y + 3, width).with_text(params);
    loop {
        textbox.render(screen);

        let key = keyboard.wait_for_key();
        if key.scan_code == SCAN_ESC {
            return false;
        }
        match key.unicode_char {
            KEY_ENTER => {
                params.clear();
                params.push_str(textbox.get_text().trim());
                return true;
            }
            KEY_BACKSPACE => textbox.backspace(),
            c if c < 0x80 => textbox.add_char(c as u8),
            _ => {}
        }
    }
}

