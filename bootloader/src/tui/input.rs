use crate::SimpleTextInputProtocol;

#[repr(C)]
pub struct InputKey {
    pub scan_code: u16,
    pub unicode_char: u16,
}

// Scan codes for special keys
pub const SCAN_UP: u16 = 0x01;
pub const SCAN_DOWN: u16 = 0x02;
pub const SCAN_ESC: u16 = 0x17;

// ASCII codes
pub const KEY_BACKSPACE: u16 = 0x08;
pub const KEY_ENTER: u16 = 0x0D;

pub struct Keyboard {
    input: *mut SimpleTextInputProtocol,
}

impl Keyboard {
    pub fn new(input: *mut SimpleTextInputProtocol) -> Self {
        Self { input }
    }

    /// Drop anything typed before the menu came up.
    pub fn reset(&mut self) {
        unsafe {
            ((*self.input).reset)(self.input, false);
        }
    }

    pub fn read_key(&mut self) -> Option<InputKey> {
        unsafe {
            let mut key = InputKey {
                scan_code: 0,
                unicode_char: 0,
            };

            let status = ((*self.input).read_key_stroke)(self.input, &mut key);

            // EFI_SUCCESS = 0
            if status == 0 {
                Some(key)
            } else {
                None
            }
        }
    }

    pub fn wait_for_key(&mut self) -> InputKey {
        loop {
            if let Some(key) = self.read_key() {
                return key;
            }
            // Small delay to avoid spinning
            for _ in 0..10000 {
                unsafe {
                    core::ptr::read_volatile(&0);
                }
            }
        }
    }
}
