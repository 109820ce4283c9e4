//! Hardware-free preview: the strip drawn on a single terminal line.

use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use crate::PixelSink;
use crate::color::{BLACK, Rgb};

const LIT: &str = "●";
const OFF: &str = "·";

/// Truecolor terminal rendering of a strip
pub struct TerminalSink<W> {
    out: W,
    pixels: Vec<Rgb>,
}

impl TerminalSink<Stdout> {
    pub fn stdout(len: usize) -> Self {
        Self::new(io::stdout(), len)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, len: usize) -> Self {
        Self {
            out,
            pixels: vec![BLACK; len],
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PixelSink for TerminalSink<W> {
    type Error = io::Error;

    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn set(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn show(&mut self) -> Result<(), Self::Error> {
        queue!(self.out, MoveToColumn(0))?;
        for pixel in &self.pixels {
            if *pixel == BLACK {
                queue!(self.out, SetForegroundColor(Color::DarkGrey), Print(OFF))?;
            } else {
                let color = Color::Rgb {
                    r: pixel.r,
                    g: pixel.g,
                    b: pixel.b,
                };
                queue!(self.out, SetForegroundColor(color), Print(LIT))?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}
