use crate::SimpleTextOutputProtocol;

// EFI text colors
pub const EFI_BLACK: usize = 0x00;
pub const EFI_GREEN: usize = 0x02;
pub const EFI_RED: usize = 0x04;
pub const EFI_LIGHTGRAY: usize = 0x07;
pub const EFI_DARKGRAY: usize = 0x08;
pub const EFI_LIGHTGREEN: usize = 0x0A;
pub const EFI_YELLOW: usize = 0x0E;
pub const EFI_WHITE: usize = 0x0F;

fn str_to_ucs2(s: &str, buf: &mut [u16]) {
    let mut i = 0;
    for ch in s.chars() {
        if i >= buf.len() - 1 {
            break;
        }
        buf[i] = if (ch as u32) <= 0xFFFF { ch as u16 } else { b'?' as u16 };
        i += 1;
    }
    buf[i] = 0;
}

pub struct Screen {
    con_out: *mut SimpleTextOutputProtocol,
    width: usize,
    height: usize,
}

impl Screen {
    pub fn new(con_out: *mut SimpleTextOutputProtocol) -> Self {
        let (width, height) = Self::get_screen_size(con_out);
        Self {
            con_out,
            width,
            height,
        }
    }

    fn get_screen_size(con_out: *mut SimpleTextOutputProtocol) -> (usize, usize) {
        unsafe {
            let protocol = &mut *con_out;

            if protocol.mode.is_null() {
                return (80, 25); // fallback
            }

            let current_mode = (*protocol.mode).mode;
            if current_mode < 0 {
                return (80, 25); // fallback
            }

            let mut cols: usize = 80;
            let mut rows: usize = 25;
            let status = (protocol.query_mode)(
                protocol,
                current_mode as usize,
                &mut cols as *mut usize,
                &mut rows as *mut usize,
            );

            if status == 0 && cols > 0 && rows > 0 {
                (cols, rows)
            } else {
                (80, 25) // fallback
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    // Calculate centered X position for content of given width
    pub fn center_x(&self, content_width: usize) -> usize {
        self.width.saturating_sub(content_width) / 2
    }

    pub fn center_y(&self, content_height: usize) -> usize {
        self.height.saturating_sub(content_height) / 2
    }

    pub fn clear(&mut self) {
        unsafe {
            let con_out = &mut *self.con_out;
            (con_out.clear_screen)(con_out);
        }
    }

    pub fn set_color(&mut self, fg: usize, bg: usize) {
        let attr = fg | (bg << 4);
        unsafe {
            let con_out = &mut *self.con_out;
            (con_out.set_attribute)(con_out, attr);
        }
    }

    pub fn enable_cursor(&mut self, visible: bool) {
        unsafe {
            let con_out = &mut *self.con_out;
            (con_out.enable_cursor)(con_out, visible);
        }
    }

    pub fn set_cursor(&mut self, x: usize, y: usize) {
        unsafe {
            let con_out = &mut *self.con_out;
            (con_out.set_cursor_position)(con_out, x, y);
        }
    }

    pub fn put_str(&mut self, s: &str) {
        let mut buffer = [0u16; 256];
        str_to_ucs2(s, &mut buffer);
        unsafe {
            let con_out = &mut *self.con_out;
            (con_out.output_string)(con_out, buffer.as_ptr());
        }
    }

    pub fn put_str_at(&mut self, x: usize, y: usize, s: &str, fg: usize, bg: usize) {
        if y >= self.height {
            return;
        }
        self.set_cursor(x, y);
        self.set_color(fg, bg);
        self.put_str(s);
    }

    pub fn put_line(&mut self, s: &str) {
        self.put_str(s);
        self.put_str("\r\n");
    }
}
