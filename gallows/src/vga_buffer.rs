//! VGA Buffer - The Face of the Gallows
//!
//! Character-cell driver for the 80x25 text surface. The cursor is a byte
//! offset into the surface (glyph byte + attribute byte per cell), so it is
//! always even and always inside the grid: reaching the end scrolls.

use core::fmt;
use lazy_static::lazy_static;
use spin::Mutex;

pub const BUFFER_HEIGHT: usize = 25;
pub const BUFFER_WIDTH: usize = 80;

/// Glyph byte + attribute byte
pub const BYTES_PER_CELL: usize = 2;
pub const ROW_BYTES: usize = BUFFER_WIDTH * BYTES_PER_CELL;
pub const GRID_BYTES: usize = ROW_BYTES * BUFFER_HEIGHT;

/// Physical VGA text buffer, identity-mapped by the bootloader
pub const VGA_BUFFER_ADDRESS: usize = 0xB8000;

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    /// Light gray on black (0x07), used for every cell
    pub const NEUTRAL: ColorCode = ColorCode::new(Color::LightGray, Color::Black);

    pub const fn new(foreground: Color, background: Color) -> ColorCode {
        ColorCode((background as u8) << 4 | (foreground as u8))
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ScreenChar {
    pub ascii_character: u8,
    pub color_code: ColorCode,
}

impl ScreenChar {
    pub const BLANK: ScreenChar = ScreenChar {
        ascii_character: b' ',
        color_code: ColorCode::NEUTRAL,
    };
}

#[repr(transparent)]
pub struct Buffer {
    chars: [[ScreenChar; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

impl Buffer {
    /// An all-blank surface, for off-screen rendering
    pub const fn blank() -> Buffer {
        Buffer {
            chars: [[ScreenChar::BLANK; BUFFER_WIDTH]; BUFFER_HEIGHT],
        }
    }
}

pub struct Writer {
    /// Byte offset into the surface, always even and below GRID_BYTES
    cursor: usize,
    color_code: ColorCode,
    buffer: *mut Buffer, // Raw pointer: the surface is memory-mapped hardware
}

// SAFETY: a Writer is the only handle to its surface, and the global one is
// only ever reached through the WRITER mutex.
unsafe impl Send for Writer {}

impl Writer {
    /// Create a writer over `buffer` with the cursor at the top-left cell
    ///
    /// # Safety
    /// `buffer` must stay valid for reads and writes for as long as the
    /// writer lives, and no other writer may drive the same surface.
    pub const unsafe fn new(buffer: *mut Buffer) -> Writer {
        Writer {
            cursor: 0,
            color_code: ColorCode::NEUTRAL,
            buffer,
        }
    }

    /// Current cursor, as a byte offset into the surface
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Blank every cell and send the cursor home
    pub fn clear(&mut self) {
        let blank = self.blank();
        for row in 0..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                self.write_cell(row, col, blank);
            }
        }
        self.cursor = 0;
    }

    pub fn put_char(&mut self, byte: u8) {
        match byte {
            b'\n' => {
                self.cursor = (self.cursor / ROW_BYTES + 1) * ROW_BYTES;
            }
            b'\x08' => {
                // Backspace at the origin has nothing to erase
                if self.cursor > 0 {
                    self.cursor -= BYTES_PER_CELL;
                    let (row, col) = self.position();
                    let blank = self.blank();
                    self.write_cell(row, col, blank);
                }
            }
            byte => {
                let (row, col) = self.position();
                let color_code = self.color_code;
                self.write_cell(
                    row,
                    col,
                    ScreenChar {
                        ascii_character: byte,
                        color_code,
                    },
                );
                self.cursor += BYTES_PER_CELL;
            }
        }

        if self.cursor >= GRID_BYTES {
            self.scroll();
        }
    }

    pub fn put_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.put_char(byte);
        }
    }

    /// Read back one cell of the surface
    pub fn cell(&self, row: usize, col: usize) -> ScreenChar {
        // SAFETY: buffer validity is the contract of `Writer::new`; indices
        // are bounds-checked by the array access.
        unsafe {
            let buffer = &*self.buffer;
            core::ptr::read_volatile(&buffer.chars[row][col] as *const ScreenChar)
        }
    }

    /// The glyph bytes of one row, attributes dropped
    pub fn row_glyphs(&self, row: usize) -> [u8; BUFFER_WIDTH] {
        let mut glyphs = [b' '; BUFFER_WIDTH];
        for (col, glyph) in glyphs.iter_mut().enumerate() {
            *glyph = self.cell(row, col).ascii_character;
        }
        glyphs
    }

    /// Row and column of the cell under the cursor
    fn position(&self) -> (usize, usize) {
        let cell = self.cursor / BYTES_PER_CELL;
        (cell / BUFFER_WIDTH, cell % BUFFER_WIDTH)
    }

    fn blank(&self) -> ScreenChar {
        ScreenChar {
            ascii_character: b' ',
            color_code: self.color_code,
        }
    }

    fn write_cell(&mut self, row: usize, col: usize, character: ScreenChar) {
        // Volatile so the compiler cannot drop stores to the device
        // SAFETY: buffer validity is the contract of `Writer::new`; indices
        // are bounds-checked by the array access.
        unsafe {
            let buffer = &mut *self.buffer;
            core::ptr::write_volatile(&mut buffer.chars[row][col] as *mut ScreenChar, character);
        }
    }

    /// Drop row 0, shift the rest up, blank the last row, pin the cursor
    fn scroll(&mut self) {
        for row in 1..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                let character = self.cell(row, col);
                self.write_cell(row - 1, col, character);
            }
        }
        let blank = self.blank();
        for col in 0..BUFFER_WIDTH {
            self.write_cell(BUFFER_HEIGHT - 1, col, blank);
        }
        self.cursor = (BUFFER_HEIGHT - 1) * ROW_BYTES;
    }
}

impl fmt::Write for Writer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_str(s);
        Ok(())
    }
}

lazy_static! {
    /// The one writer driving the real VGA surface
    pub static ref WRITER: Mutex<Writer> =
        // SAFETY: 0xB8000 is the identity-mapped text buffer and this is the
        // only writer created over it.
        Mutex::new(unsafe { Writer::new(VGA_BUFFER_ADDRESS as *mut Buffer) });
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ($crate::vga_buffer::_print(format_args!($($arg)*)));
}

#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)));
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    use core::fmt::Write;
    let _ = WRITER.lock().write_fmt(args);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(writer: &Writer, row: usize) -> std::string::String {
        let row = writer.row_glyphs(row);
        std::string::String::from_utf8_lossy(&row).trim_end().into()
    }

    #[test]
    fn test_clear_blanks_surface() {
        let mut buffer = Buffer::blank();
        let mut writer = unsafe { Writer::new(&mut buffer) };
        writer.put_str("HELLO");
        writer.clear();

        assert_eq!(writer.cursor(), 0);
        for row in 0..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                assert_eq!(writer.cell(row, col), ScreenChar::BLANK);
            }
        }
    }

    #[test]
    fn test_put_char_advances_two_bytes() {
        let mut buffer = Buffer::blank();
        let mut writer = unsafe { Writer::new(&mut buffer) };
        writer.put_char(b'A');
        writer.put_char(b'B');

        assert_eq!(writer.cursor(), 4);
        assert_eq!(writer.cell(0, 0).ascii_character, b'A');
        assert_eq!(writer.cell(0, 1).ascii_character, b'B');
        assert_eq!(writer.cell(0, 1).color_code.as_u8(), 0x07);
    }

    #[test]
    fn test_newline_rounds_up_to_next_row() {
        let mut buffer = Buffer::blank();
        let mut writer = unsafe { Writer::new(&mut buffer) };
        writer.put_str("AB\n");
        assert_eq!(writer.cursor(), ROW_BYTES);

        // From the start of a row, newline still moves a full row
        writer.put_char(b'\n');
        assert_eq!(writer.cursor(), 2 * ROW_BYTES);

        writer.put_char(b'C');
        assert_eq!(writer.cell(2, 0).ascii_character, b'C');
    }

    #[test]
    fn test_backspace_blanks_previous_cell() {
        let mut buffer = Buffer::blank();
        let mut writer = unsafe { Writer::new(&mut buffer) };
        writer.put_str("AB\x08");

        assert_eq!(writer.cursor(), 2);
        assert_eq!(writer.cell(0, 0).ascii_character, b'A');
        assert_eq!(writer.cell(0, 1), ScreenChar::BLANK);
    }

    #[test]
    fn test_backspace_at_origin_is_noop() {
        let mut buffer = Buffer::blank();
        let mut writer = unsafe { Writer::new(&mut buffer) };
        writer.put_char(b'\x08');
        assert_eq!(writer.cursor(), 0);
    }

    #[test]
    fn test_put_str_has_no_trailing_newline() {
        let mut buffer = Buffer::blank();
        let mut writer = unsafe { Writer::new(&mut buffer) };
        writer.put_str("Word: ");
        assert_eq!(writer.cursor(), 12);
        assert_eq!(glyphs(&writer, 0), "Word:");
    }

    #[test]
    fn test_scroll_discards_top_row() {
        let mut buffer = Buffer::blank();
        let mut writer = unsafe { Writer::new(&mut buffer) };
        writer.put_str("TOP");
        for _ in 0..BUFFER_HEIGHT - 1 {
            writer.put_char(b'\n');
        }
        assert_eq!(writer.cursor(), (BUFFER_HEIGHT - 1) * ROW_BYTES);

        // Filling the last row pushes the cursor off the grid
        for _ in 0..BUFFER_WIDTH {
            writer.put_char(b'Z');
        }

        assert_eq!(writer.cursor(), (BUFFER_HEIGHT - 1) * ROW_BYTES);
        assert_eq!(glyphs(&writer, 0), "");
        assert_eq!(writer.row_glyphs(BUFFER_HEIGHT - 2), [b'Z'; BUFFER_WIDTH]);
        for col in 0..BUFFER_WIDTH {
            assert_eq!(writer.cell(BUFFER_HEIGHT - 1, col), ScreenChar::BLANK);
        }
    }

    #[test]
    fn test_newline_on_last_row_scrolls() {
        let mut buffer = Buffer::blank();
        let mut writer = unsafe { Writer::new(&mut buffer) };
        writer.put_str("FIRST\nSECOND");
        for _ in 0..BUFFER_HEIGHT - 1 {
            writer.put_char(b'\n');
        }

        assert_eq!(glyphs(&writer, 0), "SECOND");
        assert_eq!(writer.cursor(), (BUFFER_HEIGHT - 1) * ROW_BYTES);
    }

    #[test]
    fn test_fmt_write() {
        use core::fmt::Write;
        let mut buffer = Buffer::blank();
        let mut writer = unsafe { Writer::new(&mut buffer) };
        write!(writer, "Attempts: {}", 6).unwrap();
        assert_eq!(glyphs(&writer, 0), "Attempts: 6");
    }
}
