/// ASCII line rasterizer for terminal drafting views
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use note3d_core::{Color, DrawSink};
use std::io::Write;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Longest run a single stroke may plot.
const MAX_STROKE_CELLS: i64 = 100_000;

/// Character canvas that maps world coordinates onto terminal cells
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    center: Point2<f64>,
    zoom: f64,
    cells: Vec<Option<(char, TermColor)>>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            center: Point2::origin(),
            zoom: 1.0,
            cells: vec![None; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![None; width * height];
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `zoom` is cells per world unit vertically.
    pub fn set_view(&mut self, center: Point2<f64>, zoom: f64) {
        self.center = center;
        self.zoom = zoom;
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    pub fn to_cell(&self, p: &Point2<f64>) -> (i64, i64) {
        let col = (p.x - self.center.x) * self.zoom * CELL_ASPECT + self.width as f64 / 2.0;
        let row = self.height as f64 / 2.0 - (p.y - self.center.y) * self.zoom;
        (col.round() as i64, row.round() as i64)
    }

    pub fn to_world(&self, col: i64, row: i64) -> Point2<f64> {
        Point2::new(
            (col as f64 - self.width as f64 / 2.0) / (self.zoom * CELL_ASPECT) + self.center.x,
            (self.height as f64 / 2.0 - row as f64) / self.zoom + self.center.y,
        )
    }

    /// World size of one cell, horizontally and vertically.
    pub fn cell_size(&self) -> (f64, f64) {
        (1.0 / (self.zoom * CELL_ASPECT), 1.0 / self.zoom)
    }

    pub fn plot(&mut self, col: i64, row: i64, ch: char, color: TermColor) {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return;
        }
        self.cells[row as usize * self.width + col as usize] = Some((ch, color));
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells[row * self.width + col].map(|(ch, _)| ch)
    }

    pub fn stroke(&mut self, from: &Point2<f64>, to: &Point2<f64>, color: TermColor) {
        let (c0, c1) = (self.to_cell(from), self.to_cell(to));
        let (dx, dy) = (c1.0 - c0.0, c1.1 - c0.1);
        if dx.abs().max(dy.abs()) > MAX_STROKE_CELLS || self.off_screen(c0, c1) {
            return;
        }
        let ch = slope_char(dx, dy);
        for (col, row) in bresenham(c0, c1) {
            self.plot(col, row, ch, color);
        }
    }

    /// Both ends beyond the same screen edge.
    fn off_screen(&self, a: (i64, i64), b: (i64, i64)) -> bool {
        let (w, h) = (self.width as i64, self.height as i64);
        (a.0 < 0 && b.0 < 0) || (a.1 < 0 && b.1 < 0) || (a.0 >= w && b.0 >= w) || (a.1 >= h && b.1 >= h)
    }

    /// Queue the canvas starting at terminal row `top`.
    pub fn draw<W: Write>(&self, writer: &mut W, top: u16) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, top + y as u16))?;
            for x in 0..self.width {
                match self.cells[y * self.width + x] {
                    Some((ch, color)) => {
                        writer.queue(SetForegroundColor(color))?;
                        writer.queue(Print(ch))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSink for AsciiRenderer {
    fn line(&mut self, from: &Point2<f64>, to: &Point2<f64>, color: Color) {
        self.stroke(from, to, term_color(color));
    }
}

/// Draws everything in one color, for selections.
pub struct Highlight<'a> {
    pub renderer: &'a mut AsciiRenderer,
    pub color: TermColor,
}

impl DrawSink for Highlight<'_> {
    fn line(&mut self, from: &Point2<f64>, to: &Point2<f64>, _color: Color) {
        self.renderer.stroke(from, to, self.color);
    }
}

pub fn term_color(color: Color) -> TermColor {
    let [r, g, b] = color.rgb();
    TermColor::Rgb { r, g, b }
}

/// Stroke character for a run of `dx` columns and `dy` rows (rows grow down).
fn slope_char(dx: i64, dy: i64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax == 0 && ay == 0 {
        '*'
    } else if ay * 2 < ax {
        '-'
    } else if ax * 2 < ay {
        '|'
    } else if (dx > 0) == (dy < 0) {
        '/'
    } else {
        '\\'
    }
}

fn bresenham(from: (i64, i64), to: (i64, i64)) -> Vec<(i64, i64)> {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut cells = Vec::with_capacity((dx - dy + 1) as usize);
    loop {
        cells.push((x, y));
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    cells
}
