use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use display::Display;
use vip8::constants::{CLOCK_SPEED, TIMER_INTERVAL};
use vip8::{Options, Processor};

use crate::keymap::keymap;

pub fn run(rom: PathBuf) -> Result<()> {
    // The beep sink rings the terminal bell; stderr is unbuffered so the
    // cue lands immediately
    let mut processor = Processor::with_options(Options {
        beep: Box::new(|| eprint!("\x07")),
        ..Options::default()
    });

    let bytes = fs::read(&rom)?;
    processor.load(&bytes);
    log::info!("loaded {} byte ROM from {}", bytes.len(), rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|error| anyhow!(error))?;
    let mut display = Display::new(&sdl).map_err(|error| anyhow!(error))?;
    let mut events = sdl.event_pump().map_err(|error| anyhow!(error))?;

    // Instructions and timers run on independent clocks
    let cycle_time = Duration::new(0, CLOCK_SPEED);
    let timer_interval = Duration::new(0, TIMER_INTERVAL);
    let mut last_cycle = Instant::now();
    let mut last_timer = Instant::now();

    // Holding a key can override the sleep pacing below
    let mut fast_forward = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(keypad)) => processor.key_pressed(keypad),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(keypad)) => processor.key_released(keypad),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            }
        }

        // One fetch/decode/execute step; the processor reports bad opcodes
        // and broken call stacks rather than guessing, and we halt on them
        if let Err(error) = processor.execute_instruction() {
            log::error!("halting: {}", error);
            break 'event;
        }

        // Catch up the 60Hz timer clock, however many deadlines have lapsed
        while last_timer.elapsed() >= timer_interval {
            processor.timer_interrupt();
            last_timer += timer_interval;
        }

        // Repaint only when the framebuffer changed
        if let Some(frame) = processor.take_frame() {
            display.render(frame).map_err(|error| anyhow!(error))?;
        }

        // Handle timing
        let elapsed_cycle_time = last_cycle.elapsed();
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    Ok(())
}
