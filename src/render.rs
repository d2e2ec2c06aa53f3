//! Renderer boundary.
//!
//! The automaton hands out plain `CellView`s and a `Frame`; something
//! implementing `Renderer` turns them into pixels, glyphs or anything else.
//! The style is picked once when the renderer is built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::automaton::{Automaton, LifeColor};
use crate::error::LifeError;

/// What a renderer needs to know about one live cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellView {
    pub x: usize,
    pub y: usize,
    pub age: u64,
    pub neighbors: u8,
    pub color: LifeColor,
}

/// Drawing-surface geometry: grid extent plus the pixel size of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub unit: u32,
}

impl Frame {
    pub fn pixel_width(&self) -> usize {
        self.width * self.unit as usize
    }

    pub fn pixel_height(&self) -> usize {
        self.height * self.unit as usize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyle {
    /// Solid square per cell.
    #[default]
    Block,
    /// Round blob per cell.
    Circle,
    /// Intensity grows with age.
    Shade,
}

impl RenderStyle {
    pub const ALL: [RenderStyle; 3] = [RenderStyle::Block, RenderStyle::Circle, RenderStyle::Shade];

    pub fn name(self) -> &'static str {
        match self {
            RenderStyle::Block => "block",
            RenderStyle::Circle => "circle",
            RenderStyle::Shade => "shade",
        }
    }
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RenderStyle {
    type Err = LifeError;

    /// Also accepts the legacy names `moogily` and `fadeIn`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "block" => Ok(RenderStyle::Block),
            "circle" | "moogily" => Ok(RenderStyle::Circle),
            "shade" | "fadein" => Ok(RenderStyle::Shade),
            _ => Err(LifeError::UnknownRenderStyle(s.to_string())),
        }
    }
}

pub trait Renderer {
    /// Start a new frame.
    fn clear(&mut self, frame: &Frame);

    /// Draw one live cell.
    fn draw(&mut self, cell: &CellView, frame: &Frame);
}

/// Clear the renderer and draw every live cell of `automaton`.
pub fn render_frame<R: Renderer + ?Sized>(automaton: &Automaton, renderer: &mut R) {
    let frame = automaton.frame();
    renderer.clear(&frame);
    for view in automaton.cell_views() {
        renderer.draw(&view, &frame);
    }
}

const EMPTY_GLYPH: char = '.';
const SHADE_GLYPHS: [char; 4] = [':', '+', '*', '#'];
const SHADE_AGE_STEP: u64 = 4;

/// Text renderer: one character per cell.
#[derive(Clone, Debug)]
pub struct AsciiCanvas {
    style: RenderStyle,
    width: usize,
    height: usize,
    glyphs: Vec<char>,
}

impl AsciiCanvas {
    pub fn new(style: RenderStyle) -> Self {
        Self {
            style,
            width: 0,
            height: 0,
            glyphs: Vec::new(),
        }
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }

    pub fn glyph_at(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.glyphs.get(y * self.width + x).copied()
    }

    fn glyph_for(&self, cell: &CellView) -> char {
        match self.style {
            RenderStyle::Block => '#',
            RenderStyle::Circle => 'o',
            RenderStyle::Shade => {
                let idx = (cell.age / SHADE_AGE_STEP).min(SHADE_GLYPHS.len() as u64 - 1);
                SHADE_GLYPHS[idx as usize]
            }
        }
    }
}

impl Renderer for AsciiCanvas {
    fn clear(&mut self, frame: &Frame) {
        self.width = frame.width;
        self.height = frame.height;
        self.glyphs.clear();
        self.glyphs.resize(frame.width * frame.height, EMPTY_GLYPH);
    }

    fn draw(&mut self, cell: &CellView, _frame: &Frame) {
        if cell.x >= self.width || cell.y >= self.height {
            return;
        }
        let glyph = self.glyph_for(cell);
        self.glyphs[cell.y * self.width + cell.x] = glyph;
    }
}

impl fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.glyphs.chunks(self.width.max(1)) {
            let line: String = row.iter().collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AsciiCanvas, RenderStyle, render_frame};
    use crate::automaton::{Automaton, SeedSource};
    use crate::error::LifeError;

    #[test]
    fn legacy_style_names() {
        assert_eq!("moogily".parse::<RenderStyle>(), Ok(RenderStyle::Circle));
        assert_eq!("fadeIn".parse::<RenderStyle>(), Ok(RenderStyle::Shade));
        assert_eq!(
            "neon".parse::<RenderStyle>(),
            Err(LifeError::UnknownRenderStyle("neon".to_string()))
        );
        for style in RenderStyle::ALL {
            assert_eq!(style.name().parse::<RenderStyle>(), Ok(style));
        }
    }

    #[test]
    fn ascii_canvas_draws_rows_top_to_bottom() {
        let life = Automaton::new(4, 3, vec![(1, 0), (3, 2)]).unwrap();
        let mut canvas = AsciiCanvas::new(RenderStyle::Block);
        render_frame(&life, &mut canvas);

        assert_eq!(canvas.to_string(), ".#..\n....\n...#\n");
        assert_eq!(canvas.glyph_at(1, 0), Some('#'));
        assert_eq!(canvas.glyph_at(4, 0), None);
    }

    #[test]
    fn shade_darkens_with_age() {
        let mut life = Automaton::new(6, 6, vec![(1, 1), (2, 1), (1, 2), (2, 2)]).unwrap();
        let mut canvas = AsciiCanvas::new(RenderStyle::Shade);
        assert_eq!(canvas.style(), RenderStyle::Shade);

        render_frame(&life, &mut canvas);
        assert_eq!(canvas.glyph_at(1, 1), Some(':'));

        life.step_n(12);
        render_frame(&life, &mut canvas);
        assert_eq!(canvas.glyph_at(1, 1), Some('#'));
    }

    #[test]
    fn frame_pixels_scale_with_unit() {
        let life = Automaton::new(4, 3, SeedSource::Empty).unwrap();
        let frame = life.frame();
        assert_eq!((frame.pixel_width(), frame.pixel_height()), (40, 30));
    }
}
