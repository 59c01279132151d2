use crate::constants::{FRAME_BUFFER_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::Error;
use crate::instruction::Instruction;
use crate::opcode::Opcode;

/// The on/off state of every display pixel as a flat row-major array,
/// indexed `y * DISPLAY_WIDTH + x`.
pub type FrameBuffer = [u8; FRAME_BUFFER_SIZE];

/// Overrides for every piece of processor state, applied at construction or
/// `reset`.
///
/// `Default` yields the power-on state: zeroed memory and registers, the
/// program counter at `PROGRAM_START`, an empty call stack, no keys held,
/// and a beep sink that does nothing. Tests lean on this to seed specific
/// registers, memory, or stack contents through struct update syntax.
pub struct Options {
    pub memory: [u8; MEMORY_SIZE],
    pub registers: [u8; 16],
    pub index_register: u16,
    pub program_counter: u16,
    pub stack: Vec<u16>,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub frame_buffer: FrameBuffer,
    pub pressed_keys: [bool; 16],
    pub beep: Box<dyn FnMut()>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            memory: [0; MEMORY_SIZE],
            registers: [0; 16],
            index_register: 0x000,
            program_counter: PROGRAM_START,
            stack: Vec::new(),
            delay_timer: 0x00,
            sound_timer: 0x00,
            frame_buffer: [0; FRAME_BUFFER_SIZE],
            pressed_keys: [false; 16],
            beep: Box::new(|| {}),
        }
    }
}

/// # Processor
/// The virtual machine core: a single externally-clocked component that owns
/// memory, registers, call stack, timers, framebuffer, and key state.
///
/// Supplies interfaces for:
/// - loading program bytes into memory
/// - advancing by one fetch/decode/execute step
/// - ticking the 60Hz timers, on a clock the host keeps separately
/// - pressing and releasing keypad keys
/// - inspecting its state through read-only views
///
/// Every operation runs to completion on the caller's thread; nothing inside
/// suspends. The one multi-step instruction is the key-wait, which leaves
/// all state untouched until a key is held and so re-executes on each step.
pub struct Processor {
    pub(crate) memory: [u8; MEMORY_SIZE],
    pub(crate) v: [u8; 16],
    pub(crate) i: u16,
    pub(crate) pc: u16,
    pub(crate) stack: Vec<u16>,
    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,
    pub(crate) frame_buffer: FrameBuffer,
    pub(crate) pressed_keys: [bool; 16],
    pub(crate) beep: Box<dyn FnMut()>,
    pub(crate) draw_flag: bool,
}

impl Processor {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Builds a processor from `options`, then writes the sprite sheet over
    /// 0x000-0x04F regardless of what the options put there.
    pub fn with_options(options: Options) -> Self {
        let mut processor = Processor {
            memory: options.memory,
            v: options.registers,
            i: options.index_register,
            pc: options.program_counter,
            stack: options.stack,
            delay_timer: options.delay_timer,
            sound_timer: options.sound_timer,
            frame_buffer: options.frame_buffer,
            pressed_keys: options.pressed_keys,
            beep: options.beep,
            draw_flag: false,
        };
        processor.load_at(&SPRITE_SHEET, 0x000);
        processor
    }

    /// Reinitializes every state field from `options`.
    pub fn reset(&mut self, options: Options) {
        *self = Self::with_options(options);
    }

    /// Copies program bytes into memory starting at `PROGRAM_START`.
    pub fn load(&mut self, bytes: &[u8]) {
        self.load_at(bytes, PROGRAM_START);
    }

    /// Copies bytes into memory, one per increasing address.
    ///
    /// The caller ensures `start_addr + bytes.len()` stays within memory.
    pub fn load_at(&mut self, bytes: &[u8], start_addr: u16) {
        let start = start_addr as usize;
        self.memory[start..start + bytes.len()].copy_from_slice(bytes);
    }

    /// Advances by a single cycle: fetch the opcode under the program
    /// counter, decode it, and run its handler.
    ///
    /// Handlers own all program counter movement. An unrecognized encoding
    /// or a return on an empty call stack surfaces as an error with the
    /// step left incomplete.
    pub fn execute_instruction(&mut self) -> Result<(), Error> {
        let opcode = self.fetch_opcode();
        log::trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            opcode.raw(),
            self.v,
            self.i,
            self.pc
        );
        let instruction = Instruction::decode(opcode)?;
        self.execute(instruction)
    }

    /// Ticks both countdown timers, each stopping at zero.
    ///
    /// Called by the host at a fixed 60Hz, decoupled from instruction rate.
    pub fn timer_interrupt(&mut self) {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }
        if self.sound_timer > 0 {
            self.sound_timer -= 1;
        }
    }

    /// Marks a keypad key (0x0..0xF) as held. Idempotent.
    pub fn key_pressed(&mut self, key: u8) {
        self.pressed_keys[usize::from(key)] = true;
    }

    /// Marks a keypad key (0x0..0xF) as released. Idempotent.
    pub fn key_released(&mut self, key: u8) {
        self.pressed_keys[usize::from(key)] = false;
    }

    /// Returns the framebuffer if it changed since the last call, clearing
    /// the redraw mark.
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.draw_flag {
            self.draw_flag = false;
            Some(&self.frame_buffer)
        } else {
            None
        }
    }

    pub fn memory(&self) -> &[u8; MEMORY_SIZE] {
        &self.memory
    }

    /// The 16 general purpose registers V0..VF. VF doubles as the
    /// carry/borrow/collision flag.
    pub fn registers(&self) -> &[u8; 16] {
        &self.v
    }

    pub fn index_register(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.pc
    }

    /// Return addresses of the subroutines currently being executed.
    pub fn stack(&self) -> &[u16] {
        &self.stack
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn pressed_keys(&self) -> &[bool; 16] {
        &self.pressed_keys
    }

    /// Combines the two bytes under the program counter big-endian.
    fn fetch_opcode(&self) -> Opcode {
        Opcode::from_bytes(
            self.memory[self.pc as usize],
            self.memory[self.pc as usize + 1],
        )
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test_processor {
    use super::*;
    use crate::constants::PROGRAM_START;

    #[test]
    fn test_fetches_opcodes_big_endian() {
        let mut processor = Processor::new();
        processor.load(&[0xAA, 0xBB]);
        assert_eq!(processor.fetch_opcode(), Opcode::from(0xAABB));
    }

    #[test]
    fn test_load_starts_at_program_start() {
        let mut processor = Processor::new();
        processor.load(&[0x12, 0x34, 0x56]);
        assert_eq!(
            processor.memory[PROGRAM_START as usize..PROGRAM_START as usize + 3],
            [0x12, 0x34, 0x56]
        );
    }

    #[test]
    fn test_load_at_caller_address() {
        let mut processor = Processor::new();
        processor.load_at(&[0xAB], 0x300);
        assert_eq!(processor.memory[0x300], 0xAB);
    }

    #[test]
    fn test_reset_applies_overrides() {
        let mut processor = Processor::new();
        let mut registers = [0; 16];
        registers[0x3] = 0x42;
        processor.reset(Options {
            registers,
            program_counter: 0x456,
            stack: vec![0x123],
            ..Options::default()
        });
        assert_eq!(processor.v[0x3], 0x42);
        assert_eq!(processor.pc, 0x456);
        assert_eq!(processor.stack, vec![0x123]);
    }

    #[test]
    fn test_sprite_sheet_overrides_seeded_memory() {
        let processor = Processor::with_options(Options {
            memory: [0xFF; MEMORY_SIZE],
            ..Options::default()
        });
        assert_eq!(processor.memory[..0x50], SPRITE_SHEET[..]);
        assert_eq!(processor.memory[0x50], 0xFF);
    }

    #[test]
    fn test_timer_interrupt_decrements_both_timers() {
        let mut processor = Processor::with_options(Options {
            delay_timer: 2,
            sound_timer: 1,
            ..Options::default()
        });
        processor.timer_interrupt();
        assert_eq!(processor.delay_timer, 1);
        assert_eq!(processor.sound_timer, 0);
    }

    #[test]
    fn test_timer_interrupt_stops_at_zero() {
        let mut processor = Processor::new();
        processor.timer_interrupt();
        assert_eq!(processor.delay_timer, 0);
        assert_eq!(processor.sound_timer, 0);
    }

    #[test]
    fn test_key_presses_are_idempotent() {
        let mut processor = Processor::new();
        processor.key_pressed(0xE);
        processor.key_pressed(0xE);
        assert!(processor.pressed_keys[0xE]);
        processor.key_released(0xE);
        processor.key_released(0xE);
        assert!(!processor.pressed_keys[0xE]);
    }

    #[test]
    fn test_releasing_an_unpressed_key_is_a_noop() {
        let mut processor = Processor::new();
        processor.key_released(0x1);
        assert_eq!(processor.pressed_keys, [false; 16]);
    }

    #[test]
    fn test_take_frame_only_after_a_draw() {
        let mut processor = Processor::new();
        assert!(processor.take_frame().is_none());

        // 00E0 marks the frame dirty
        processor.load(&[0x00, 0xE0]);
        processor.execute_instruction().unwrap();
        assert!(processor.take_frame().is_some());
        assert!(processor.take_frame().is_none());
    }

    #[test]
    fn test_unrecognized_opcode_leaves_the_step_incomplete() {
        let mut processor = Processor::new();
        processor.load(&[0xFF, 0xFF]);
        assert_eq!(
            processor.execute_instruction(),
            Err(Error::UnrecognizedOpcode { opcode: 0xFFFF })
        );
        assert_eq!(processor.pc, PROGRAM_START);
    }
}
