//! In-place single-line progress bar.
//!
//! Renders `[current / max] |=====-----| 50.0%` and redraws the same terminal
//! line on every update. Every call is a blocking write followed by a flush.

use std::io::{self, Write};

use thiserror::Error;

/// Default bar width in characters.
pub const DEFAULT_BAR_WIDTH: usize = 30;

/// Default message printed after the bar by [`ProgressReporter::complete`].
pub const DEFAULT_COMPLETE_MESSAGE: &str = "completed";

const FILLED_GLYPH: char = '=';
const EMPTY_GLYPH: char = '-';

/// Errors from constructing or updating a progress bar.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// The maximum must be a finite number greater than zero.
    #[error("progress maximum must be a positive number, got {0}")]
    InvalidMaximum(f64),
    /// The bar must be at least one character wide.
    #[error("progress bar width must be positive")]
    InvalidWidth,
    /// An update value was NaN or infinite.
    #[error("progress value must be a finite number, got {0}")]
    NotANumber(f64),
    /// Writing to the terminal failed.
    #[error("failed to draw progress bar: {0}")]
    Io(#[from] io::Error),
}

/// A progress bar counting from 0 to a fixed maximum.
#[derive(Debug)]
pub struct ProgressReporter<W: Write> {
    writer: W,
    max_value: f64,
    width: usize,
    digits: usize,
    current_value: f64,
    printed_chars: usize,
}

impl<W: Write> ProgressReporter<W> {
    /// Creates a bar and draws the initial empty frame.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::InvalidMaximum`] when `max_value` is not a
    /// finite positive number, [`ProgressError::InvalidWidth`] when `width` is
    /// zero, and [`ProgressError::Io`] when the first frame cannot be written.
    pub fn new(writer: W, max_value: f64, width: usize) -> Result<Self, ProgressError> {
        if !max_value.is_finite() || max_value <= 0.0 {
            return Err(ProgressError::InvalidMaximum(max_value));
        }
        if width == 0 {
            return Err(ProgressError::InvalidWidth);
        }

        let mut reporter = Self {
            writer,
            max_value,
            width,
            digits: digit_count(max_value),
            current_value: 0.0,
            printed_chars: 0,
        };
        reporter.update(0.0)?;
        Ok(reporter)
    }

    /// Sets the current value, clamped to `[0, max]`, and redraws the line.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::NotANumber`] for NaN or infinite values, in
    /// which case neither the state nor the display changes.
    pub fn update(&mut self, value: f64) -> Result<(), ProgressError> {
        if !value.is_finite() {
            return Err(ProgressError::NotANumber(value));
        }
        self.current_value = value.clamp(0.0, self.max_value);
        self.draw()
    }

    /// Fills the bar to 100% and ends the line with `message`.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::Io`] when the terminal write fails.
    pub fn complete(&mut self, message: &str) -> Result<(), ProgressError> {
        self.update(self.max_value)?;
        writeln!(self.writer, " {message}")?;
        self.writer.flush()?;
        self.printed_chars = 0;
        Ok(())
    }

    /// Current (clamped) value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.current_value
    }

    /// Completion percentage in `[0, 100]`.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        (self.current_value / self.max_value * 100.0).min(100.0)
    }

    /// Renders the current frame without drawing it.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn render(&self) -> String {
        let percentage = self.percentage();
        let filled = ((percentage * self.width as f64 / 100.0).floor() as usize).min(self.width);
        let empty = self.width - filled;
        format!(
            "[{current:0digits$} / {max}] |{bar}{rest}| {percentage:.1}%",
            current = self.current_value.trunc() as u64,
            digits = self.digits,
            max = self.max_value.trunc() as u64,
            bar = FILLED_GLYPH.to_string().repeat(filled),
            rest = EMPTY_GLYPH.to_string().repeat(empty),
        )
    }

    /// Consumes the reporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn draw(&mut self) -> Result<(), ProgressError> {
        let frame = self.render();
        if self.printed_chars > 0 {
            // Blank out the previous frame so a shorter frame leaves no residue.
            write!(self.writer, "\r{}\r", " ".repeat(self.printed_chars))?;
        }
        write!(self.writer, "{frame}")?;
        self.writer.flush()?;
        self.printed_chars = frame.chars().count();
        Ok(())
    }
}

/// Width of the zero-padded current value: `ceil(log10(max + 1))`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn digit_count(max_value: f64) -> usize {
    ((max_value + 1.0).log10().ceil() as usize).max(1)
}
