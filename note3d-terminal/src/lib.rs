/// Terminal drafting viewer and editor for Note3D models
use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use nalgebra::{Matrix4, Point2, Vector2};
use note3d_core::color::BASIC;
use note3d_core::{to_text, Camera, PickBox, Plane, Projection, SceneGraph, Transform};
use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

pub mod renderer;

pub use renderer::{AsciiRenderer, Highlight};

const ROTATE_STEP: f64 = std::f64::consts::PI / 12.0;

/// What the canvas shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Drafting(Plane),
    Rotating,
}

impl ViewMode {
    pub fn projection(&self, camera: &Camera) -> Projection {
        match self {
            ViewMode::Drafting(plane) => Projection::Plane(*plane),
            ViewMode::Rotating => camera.projection(),
        }
    }

    fn label(&self) -> String {
        match self {
            ViewMode::Drafting(plane) => plane.to_string(),
            ViewMode::Rotating => "3D".to_string(),
        }
    }
}

/// Main application struct for the terminal editor
pub struct TerminalApp {
    model: SceneGraph,
    mode: ViewMode,
    camera: Camera,
    renderer: AsciiRenderer,
    center: Point2<f64>,
    zoom: f64,
    cursor: (i64, i64),
    anchor: Option<Point2<f64>>,
    /// Middle point of a three-point arc.
    via: Option<Point2<f64>>,
    /// Polygon corners collected so far.
    outline: Vec<Point2<f64>>,
    picked: Vec<usize>,
    pick_cells: f64,
    moving: bool,
    /// Move increment shown as a preview until committed.
    pending: Matrix4<f64>,
    /// Start of a rotate gesture.
    turn_from: Option<Point2<f64>>,
    spinning: bool,
    save_path: Option<PathBuf>,
    status: String,
    running: bool,
}

impl TerminalApp {
    pub fn new(model: SceneGraph, mode: ViewMode) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(model, mode, width as usize, height as usize))
    }

    /// App with a fixed terminal size; two rows are kept for the header and status line.
    pub fn with_size(model: SceneGraph, mode: ViewMode, width: usize, height: usize) -> Self {
        let canvas_height = height.saturating_sub(2);
        Self {
            model,
            mode,
            camera: Camera::new(),
            renderer: AsciiRenderer::new(width, canvas_height),
            center: Point2::origin(),
            zoom: 2.0,
            cursor: (width as i64 / 2, canvas_height as i64 / 2),
            anchor: None,
            via: None,
            outline: Vec::new(),
            picked: Vec::new(),
            pick_cells: 1.0,
            moving: false,
            pending: Matrix4::identity(),
            turn_from: None,
            spinning: false,
            save_path: None,
            status: String::new(),
            running: true,
        }
    }

    pub fn with_save_path(mut self, path: PathBuf) -> Self {
        self.save_path = Some(path);
        self
    }

    /// Pick box half size in character rows.
    pub fn with_pick_size(mut self, cells: f64) -> Self {
        self.pick_cells = cells.max(0.5);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn model(&self) -> &SceneGraph {
        &self.model
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn picked(&self) -> &[usize] {
        &self.picked
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let frame_time = Duration::from_millis(1000 / 30);

        while self.running {
            if event::poll(frame_time)? {
                match event::read()? {
                    Event::Key(KeyEvent { code, .. }) => self.handle_key(code),
                    Event::Resize(width, height) => {
                        self.renderer
                            .resize(width as usize, (height as usize).saturating_sub(2));
                    }
                    _ => {}
                }
            }

            self.update();
            self.render()?;
        }

        Ok(())
    }

    fn update(&mut self) {
        if self.spinning && self.mode == ViewMode::Rotating {
            self.camera.rotation.orbit(0.0, 0.0, 0.02);
        }
    }

    fn projection(&self) -> Projection {
        self.mode.projection(&self.camera)
    }

    fn cursor_world(&self) -> Point2<f64> {
        self.renderer.to_world(self.cursor.0, self.cursor.1)
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('1') => self.set_mode(ViewMode::Drafting(Plane::Xy)),
            KeyCode::Char('2') => self.set_mode(ViewMode::Drafting(Plane::Yz)),
            KeyCode::Char('3') => self.set_mode(ViewMode::Drafting(Plane::Zx)),
            KeyCode::Char('4') => self.set_mode(ViewMode::Rotating),
            KeyCode::Char('+') => self.zoom *= 1.25,
            KeyCode::Char('-') => self.zoom /= 1.25,
            KeyCode::Char('0') => {
                self.center = Point2::origin();
                self.zoom = 2.0;
                self.camera = Camera::new();
            }
            KeyCode::Char('n') => {
                self.model.clear();
                self.picked.clear();
                self.status = "new model".to_string();
            }
            KeyCode::Char('S') => self.save(),
            _ => match self.mode {
                ViewMode::Drafting(plane) => self.handle_drafting_key(code, plane),
                ViewMode::Rotating => self.handle_rotating_key(code),
            },
        }
    }

    fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.cancel_edit();
        if let ViewMode::Drafting(plane) = mode {
            self.model.config_mut().plane = plane;
        }
    }

    fn handle_rotating_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('w') | KeyCode::Up => self.camera.rotation.orbit(0.1, 0.0, 0.0),
            KeyCode::Char('s') | KeyCode::Down => self.camera.rotation.orbit(-0.1, 0.0, 0.0),
            KeyCode::Char('a') | KeyCode::Left => self.camera.rotation.orbit(0.0, -0.1, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.camera.rotation.orbit(0.0, 0.1, 0.0),
            KeyCode::Char('e') => self.camera.rotation.orbit(0.0, 0.0, 0.1),
            KeyCode::Char('r') => self.camera.rotation.orbit(0.0, 0.0, -0.1),
            KeyCode::Char(' ') => self.spinning = !self.spinning,
            _ => {}
        }
    }

    fn handle_drafting_key(&mut self, code: KeyCode, plane: Plane) {
        let step = match code {
            KeyCode::Left => Some((-1, 0)),
            KeyCode::Right => Some((1, 0)),
            KeyCode::Up => Some((0, -1)),
            KeyCode::Down => Some((0, 1)),
            _ => None,
        };
        if let Some((dc, dr)) = step {
            if self.moving {
                self.move_picked(dc, dr, plane);
            } else {
                self.move_cursor(dc, dr);
            }
            return;
        }

        let here = self.cursor_world();
        match code {
            KeyCode::Char(' ') | KeyCode::Enter => self.pick(plane),
            KeyCode::Char('c') => {
                self.picked.clear();
                self.cancel_edit();
            }
            KeyCode::Char('a') => {
                self.anchor = Some(here);
                self.status = format!("anchor at {:.2} {:.2}", here.x, here.y);
            }
            KeyCode::Char('l') => self.add_from_anchor("line", |m, a| m.add_line(a, here)),
            KeyCode::Char('o') => self.add_from_anchor("circle", |m, a| m.add_circle(a, here)),
            KeyCode::Char('p') => self.add_from_anchor("rect", |m, a| m.add_rect(a, here)),
            KeyCode::Char('b') => {
                self.add_from_anchor("wire cube", |m, a| m.add_wire_cube(a, here, None))
            }
            KeyCode::Char('B') => self.add_from_anchor("cube", |m, a| m.add_cube(a, here, None)),
            KeyCode::Char('v') => {
                self.via = Some(here);
                self.status = format!("arc mid point at {:.2} {:.2}", here.x, here.y);
            }
            KeyCode::Char('e') => self.add_arc(here),
            KeyCode::Char('y') => {
                self.outline.push(here);
                self.status = format!("polygon: {} points, Y to close", self.outline.len());
            }
            KeyCode::Char('Y') => self.add_polygon(),
            KeyCode::Char('g') => self.add_parts(),
            KeyCode::Char('k') => self.cycle_color(),
            KeyCode::Char('m') if !self.picked.is_empty() => {
                if self.moving {
                    let increment = std::mem::replace(&mut self.pending, Matrix4::identity());
                    self.edit_picked(&increment);
                    self.moving = false;
                    self.status = "move done".to_string();
                } else {
                    self.turn_from = None;
                    self.moving = true;
                    self.status = "move: arrows, m to place".to_string();
                }
            }
            KeyCode::Char('t') if !self.picked.is_empty() => self.turn(here, plane),
            KeyCode::Char('r') => self.rotate_picked(ROTATE_STEP, plane),
            KeyCode::Char('R') => self.rotate_picked(-ROTATE_STEP, plane),
            KeyCode::Char('x') => self.remove_picked(),
            KeyCode::Char('i') => {
                if let Some(text) = self.picked.first().and_then(|&i| self.model.describe(i)) {
                    self.status = text.replace('\n', " | ");
                }
            }
            _ => {}
        }
    }

    /// Move the cursor one cell, scrolling the view at the canvas edge.
    fn move_cursor(&mut self, dc: i64, dr: i64) {
        let (w, h) = (self.renderer.width() as i64, self.renderer.height() as i64);
        let (col, row) = (self.cursor.0 + dc, self.cursor.1 + dr);
        let (cw, ch) = self.renderer.cell_size();
        if col < 0 || col >= w {
            self.center.x += dc as f64 * cw;
        } else {
            self.cursor.0 = col;
        }
        if row < 0 || row >= h {
            self.center.y -= dr as f64 * ch;
        } else {
            self.cursor.1 = row;
        }
    }

    fn pick(&mut self, plane: Plane) {
        let (_, ch) = self.renderer.cell_size();
        let pick = PickBox::around(self.cursor_world(), self.pick_cells * ch);
        self.picked = self.model.pick(&pick, plane);
        self.status = format!("picked {:?}", self.picked);
    }

    fn add_from_anchor(&mut self, what: &str, add: impl FnOnce(&mut SceneGraph, Point2<f64>) -> usize) {
        let Some(anchor) = self.anchor else {
            self.status = "set an anchor with 'a' first".to_string();
            return;
        };
        let index = add(&mut self.model, anchor);
        self.anchor = None;
        self.picked = vec![index];
        self.status = format!("added {what} [{index}]");
    }

    fn add_arc(&mut self, end: Point2<f64>) {
        let Some(mid) = self.via else {
            self.status = "set an arc mid point with 'v' first".to_string();
            return;
        };
        if self.anchor.is_some() {
            self.via = None;
        }
        self.add_from_anchor("arc", |m, a| m.add_arc(a, mid, end));
    }

    fn add_polygon(&mut self) {
        if self.outline.len() < 3 {
            self.status = "a polygon needs 3 points, add them with 'y'".to_string();
            return;
        }
        let points = std::mem::take(&mut self.outline);
        let index = self.model.add_polygon(points);
        self.picked = vec![index];
        self.status = format!("added polygon [{index}]");
    }

    /// Step the construction color and recolor the picked elements.
    fn cycle_color(&mut self) {
        let current = self.model.config().color;
        let next = BASIC
            .iter()
            .position(|&c| c == current)
            .map_or(0, |i| (i + 1) % BASIC.len());
        let color = BASIC[next];
        self.model.config_mut().color = color;
        for &index in &self.picked {
            if let Err(e) = self.model.set_color(index, color) {
                warn!(index, error = %e, "recolor skipped");
            }
        }
        self.status = format!("color {color}");
    }

    fn add_parts(&mut self) {
        let name = format!("parts{}", self.model.next_index());
        let index = self.model.add_parts(&name);
        self.status = format!("added {name} [{index}], now current");
    }

    fn edit_picked(&mut self, increment: &Matrix4<f64>) {
        for &index in &self.picked {
            if let Err(e) = self.model.apply_matrix(index, increment) {
                warn!(index, error = %e, "edit skipped");
            }
        }
    }

    fn move_picked(&mut self, dc: i64, dr: i64, plane: Plane) {
        let (cw, ch) = self.renderer.cell_size();
        let delta = Vector2::new(dc as f64 * cw, -dr as f64 * ch);
        self.pending *= Transform::drag_translation(&delta, plane);
    }

    /// First press starts a rotate gesture at `here`, the second applies it.
    fn turn(&mut self, here: Point2<f64>, plane: Plane) {
        match self.turn_from.take() {
            None => {
                self.cancel_edit();
                self.turn_from = Some(here);
                self.status = "rotate: move the cursor, t to apply".to_string();
            }
            Some(from) => {
                let increment = self.turn_increment(from, here, plane);
                self.edit_picked(&increment);
                self.status = "rotate done".to_string();
            }
        }
    }

    /// Rotation dragging `from` onto `to` about the anchor, or the origin
    /// when no anchor is set.
    fn turn_increment(&self, from: Point2<f64>, to: Point2<f64>, plane: Plane) -> Matrix4<f64> {
        let pivot = self.anchor.unwrap_or_else(Point2::origin).coords;
        Transform::drag_translation(&-pivot, plane)
            * Transform::drag_rotation(&Point2::from(from.coords - pivot), &Point2::from(to.coords - pivot), plane)
            * Transform::drag_translation(&pivot, plane)
    }

    /// Increment the selection is previewed with.
    fn preview_increment(&self) -> Matrix4<f64> {
        match (self.mode, self.turn_from) {
            (ViewMode::Drafting(_), _) if self.moving => self.pending,
            (ViewMode::Drafting(plane), Some(from)) => {
                self.turn_increment(from, self.cursor_world(), plane)
            }
            _ => Matrix4::identity(),
        }
    }

    /// Drop an uncommitted move or rotate.
    fn cancel_edit(&mut self) {
        self.moving = false;
        self.pending = Matrix4::identity();
        self.turn_from = None;
    }

    fn rotate_picked(&mut self, angle: f64, plane: Plane) {
        self.edit_picked(&Transform::plane_rotation(angle, plane));
    }

    fn remove_picked(&mut self) {
        let removed = self
            .picked
            .drain(..)
            .filter(|&index| self.model.remove(index))
            .count();
        self.cancel_edit();
        self.status = format!("removed {removed}");
    }

    fn save(&mut self) {
        let Some(path) = self.save_path.clone() else {
            self.status = "no file to save to".to_string();
            return;
        };
        self.status = match std::fs::write(&path, to_text(&self.model))
            .with_context(|| format!("writing {}", path.display()))
        {
            Ok(()) => {
                info!(path = %path.display(), "model saved");
                format!("saved {}", path.display())
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                format!("{e:#}")
            }
        };
    }

    /// Rasterize the model, selection and cursor into the canvas.
    pub fn compose(&mut self) {
        let projection = self.projection();
        let increment = self.preview_increment();
        self.renderer.set_view(self.center, self.zoom);
        self.renderer.clear();
        self.model.draw(&mut self.renderer, projection);

        let mut highlight = Highlight {
            renderer: &mut self.renderer,
            color: TermColor::Yellow,
        };
        for drawing in self.model.drag_preview(&self.picked, &increment, projection) {
            drawing.draw_into(&mut highlight);
        }

        if let ViewMode::Drafting(_) = self.mode {
            self.renderer.plot(self.cursor.0, self.cursor.1, '+', TermColor::White);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.compose();

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout, 1)?;

        // Header and status line
        let world = self.cursor_world();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "Note3D | {} | cursor {:.2} {:.2} | items {} | 1-4=View a=Anchor l/o/p/b/B=Add v,e=Arc y,Y=Polygon Space=Pick k=Color m=Move t=Turn x=Delete S=Save Q=Quit",
                self.mode.label(),
                world.x,
                world.y,
                self.model.item_count()
            )),
            cursor::MoveTo(0, self.renderer.height() as u16 + 1),
            terminal::Clear(ClearType::CurrentLine),
            Print(&self.status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// A small model exercising every primitive kind.
pub fn demo_model() -> SceneGraph {
    let mut model = SceneGraph::new();
    model.add_rect(Point2::new(-4.0, -3.0), Point2::new(4.0, 3.0));
    model.add_circle(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0));

    model.add_parts("box");
    model.add_cube(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0), Some(2.0));
    model.config_mut().plane = Plane::Yz;
    model.add_arc(Point2::new(-2.0, 0.0), Point2::new(0.0, 2.0), Point2::new(2.0, 0.0));

    model.add_parts("frame");
    model.config_mut().plane = Plane::Xy;
    model.add_wire_cube(Point2::new(-3.0, -3.0), Point2::new(3.0, 3.0), Some(3.0));
    model.add_line(Point2::new(-5.0, 0.0), Point2::new(5.0, 0.0));
    model.reindex();
    model
}
