/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// The address at which loaded programs begin.
pub const PROGRAM_START: u16 = 0x200;

/// Display dimensions measured in pixels.
pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Pixels in one frame.
pub const FRAME_BUFFER_SIZE: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// Nanoseconds per instruction cycle (~500Hz).
///
/// The processor itself is externally clocked; this is the rate a host loop
/// should drive `execute_instruction` at for most ROMs.
pub const CLOCK_SPEED: u32 = 2_000_000;

/// Nanoseconds per timer tick (60Hz).
///
/// `timer_interrupt` runs on its own clock, independent of instruction rate.
pub const TIMER_INTERVAL: u32 = 16_666_667;

/// # Sprite sheet
/// Glyphs for the hex digits 0..F, 5 bytes per glyph, one byte per row with
/// the leftmost pixel in the most significant bit.
///
/// Written to addresses 0x000-0x04F on every reset so that `ld F, Vx` can
/// resolve a digit to its glyph as `digit * 5`.
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
