use sdl2::pixels::PixelFormatEnum;

use vip8::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use vip8::FrameBuffer;

const SCALE: usize = 10;

/// # Display
/// Renders the processor's 64x32 monochrome framebuffer in an SDL2 window.
///
/// Pixels arrive as a flat row-major array of 1-bit values and are shown
/// white-on-black at a fixed integer scale. `render` is only called when the
/// processor reports a dirty frame, so the window repaints at most once per
/// framebuffer change.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Opens a window bound to an sdl2 context.
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "vip8",
                (DISPLAY_WIDTH * SCALE) as u32,
                (DISPLAY_HEIGHT * SCALE) as u32,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|error| error.to_string())?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|error| error.to_string())?;

        Ok(Display { canvas })
    }

    /// Expands a framebuffer into an SDL2 RGB24 texture buffer.
    ///
    /// Each 1-bit pixel becomes three equal color channels, scaled from
    /// binary state to 0-255 intensity.
    fn frame_to_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|pixel| std::iter::repeat(pixel).take(3))
            .map(|pixel| pixel * 255)
            .collect()
    }

    /// Uploads the framebuffer as a streaming texture and presents it.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|error| error.to_string())?;

        texture.with_lock(None, |buffer: &mut [u8], _pitch: usize| {
            buffer.copy_from_slice(&Display::frame_to_texture(frame));
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vip8::constants::FRAME_BUFFER_SIZE;

    #[test]
    fn test_frame_to_texture() {
        let mut frame: FrameBuffer = [0; FRAME_BUFFER_SIZE];
        frame[0..2].copy_from_slice(&[0, 1]);
        frame[DISPLAY_WIDTH..DISPLAY_WIDTH + 2].copy_from_slice(&[1, 0]);
        let texture = Display::frame_to_texture(&frame);

        let mut expected = vec![0; 3 * FRAME_BUFFER_SIZE];
        expected[0..6].copy_from_slice(&[0, 0, 0, 255, 255, 255]);
        expected[3 * DISPLAY_WIDTH..3 * DISPLAY_WIDTH + 6]
            .copy_from_slice(&[255, 255, 255, 0, 0, 0]);

        assert_eq!(texture, expected);
    }
}
