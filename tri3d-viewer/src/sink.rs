/// Destinations for rendered frames: image files and the terminal
use std::io::{stdout, Stdout, Write};
use std::path::Path;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use image::{ImageFormat, Rgb, RgbImage};

use crate::error::{Result, ViewerError};

/// Key code reported for the escape key
pub const KEY_ESC: u32 = 27;

/// Where frames go once drawn
pub trait ImageSink {
    /// Encode `image` into the file at `path`
    fn write(&mut self, image: &RgbImage, path: &Path) -> Result<()>;

    /// Show `image` to the user
    fn present(&mut self, image: &RgbImage) -> Result<()>;

    /// Block up to `timeout` for a key press
    fn wait_key(&mut self, timeout: Duration) -> Result<Option<u32>>;

    /// One-line status text shown next to the frame
    fn status(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
}

/// Save an image, picking the encoder from the file extension (PNG otherwise)
pub fn save_image(image: &RgbImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    image.save_with_format(path, format)?;
    log::debug!("wrote {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Writes frames to disk; cannot display
#[derive(Debug, Default)]
pub struct FileSink;

impl ImageSink for FileSink {
    fn write(&mut self, image: &RgbImage, path: &Path) -> Result<()> {
        save_image(image, path)
    }

    fn present(&mut self, _image: &RgbImage) -> Result<()> {
        Err(ViewerError::Unsupported("file sink cannot display frames"))
    }

    fn wait_key(&mut self, _timeout: Duration) -> Result<Option<u32>> {
        Err(ViewerError::Unsupported("file sink has no keyboard"))
    }
}

/// Map a terminal key to the code the frame loop understands
pub fn key_code(code: KeyCode) -> Option<u32> {
    match code {
        KeyCode::Esc => Some(KEY_ESC),
        KeyCode::Enter => Some(13),
        KeyCode::Tab => Some(9),
        KeyCode::Backspace => Some(8),
        KeyCode::Char(c) => Some(c as u32),
        _ => None,
    }
}

/// Displays frames as half-block characters in the terminal.
///
/// Raw mode and the alternate screen are active for the lifetime of the
/// sink and restored on drop. Log output at `debug` or below goes to stderr
/// on top of the frame, so keep `RUST_LOG` at `info` or quieter while it runs.
pub struct TerminalSink {
    out: Stdout,
    status: String,
}

impl TerminalSink {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self {
            out,
            status: String::new(),
        })
    }

    fn draw(&mut self, image: &RgbImage) -> Result<()> {
        let (cols, rows) = terminal::size()?;
        // Keep the last row for the status line.
        let cols = cols.max(1) as u32;
        let rows = rows.saturating_sub(1).max(1) as u32;

        // Each cell shows two stacked pixels.
        let scale = (image.width() as f32 / cols as f32)
            .max(image.height() as f32 / (rows * 2) as f32)
            .max(1.0);
        let grid_w = ((image.width() as f32 / scale) as u32).min(cols);
        let grid_h = ((image.height() as f32 / (scale * 2.0)) as u32).min(rows);

        let sample = |gx: u32, gy: u32| -> Color {
            let x = ((gx as f32 + 0.5) * scale) as u32;
            let y = ((gy as f32 + 0.5) * scale) as u32;
            let Rgb([r, g, b]) = *image.get_pixel(x.min(image.width() - 1), y.min(image.height() - 1));
            Color::Rgb { r, g, b }
        };

        queue!(self.out, cursor::MoveTo(0, 0))?;
        for row in 0..grid_h {
            queue!(self.out, cursor::MoveTo(0, row as u16))?;
            for col in 0..grid_w {
                queue!(
                    self.out,
                    SetForegroundColor(sample(col, row * 2)),
                    SetBackgroundColor(sample(col, row * 2 + 1)),
                    Print('▀')
                )?;
            }
        }

        queue!(
            self.out,
            ResetColor,
            cursor::MoveTo(0, rows as u16),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(&self.status),
            ResetColor
        )?;

        self.out.flush()?;
        Ok(())
    }
}

impl ImageSink for TerminalSink {
    fn write(&mut self, image: &RgbImage, path: &Path) -> Result<()> {
        save_image(image, path)
    }

    fn present(&mut self, image: &RgbImage) -> Result<()> {
        if image.width() == 0 || image.height() == 0 {
            return Ok(());
        }
        self.draw(image)
    }

    fn wait_key(&mut self, timeout: Duration) -> Result<Option<u32>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => Ok(key_code(code)),
            _ => Ok(None),
        }
    }

    fn status(&mut self, text: &str) -> Result<()> {
        self.status = text.to_string();
        Ok(())
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        // Cleanup
        let _ = execute!(self.out, terminal::LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(key_code(KeyCode::Esc), Some(KEY_ESC));
        assert_eq!(key_code(KeyCode::Char('a')), Some('a' as u32));
        assert_eq!(key_code(KeyCode::Char('d')), Some(100));
        assert_eq!(key_code(KeyCode::F(5)), None);
    }

    #[test]
    fn test_file_sink_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let image = RgbImage::from_pixel(7, 5, Rgb([10, 20, 30]));

        FileSink.write(&image, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (7, 5));
        assert_eq!(loaded.get_pixel(3, 3), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_file_sink_cannot_display() {
        let image = RgbImage::new(1, 1);
        assert!(matches!(
            FileSink.present(&image),
            Err(ViewerError::Unsupported(_))
        ));
        assert!(FileSink.wait_key(Duration::from_millis(1)).is_err());
    }
}
