//! Crossterm terminal canvas for robomaze.
//!
//! Provides a [`TerminalCanvas`] that implements [`robomaze_sim::Canvas`],
//! drawing every arena cell as a two-column block of terminal cells.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use robomaze_core::{Color, Direction, Grid, Point, Robot, Tile};
use robomaze_sim::{ArenaStyle, Canvas, CanvasResult, RobotStyle};

const FLOOR: Color = Color::WHITE;
const FLOOR_DOT: Color = Color(0xB0B0B0);
const OBSTACLE: Color = Color(0x202020);
const MARKER: Color = Color(0xDEC859);

/// Maps a [`robomaze_core::Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    CtColor::Rgb {
        r: c.r(),
        g: c.g(),
        b: c.b(),
    }
}

fn arrow(d: Direction) -> &'static str {
    match d {
        Direction::Up => "↑ ",
        Direction::Right => "→ ",
        Direction::Down => "↓ ",
        Direction::Left => "← ",
    }
}

/// Number of whole cells covering `padding` canvas units.
fn margin(style: &ArenaStyle) -> i32 {
    let cells = style.padding.div_ceil(style.cell_size.max(1));
    i32::try_from(cells).unwrap_or(i32::MAX).min(u16::MAX as i32)
}

/// A terminal canvas using crossterm.
///
/// Output is queued and only flushed on [`present`](Canvas::present).
pub struct TerminalCanvas<W: Write = Stdout> {
    out: W,
    arena: Option<ArenaStyle>,
    /// Grid as of the last draw, used to repaint the arena layer.
    grid: Option<Grid>,
    robot_at: Option<Point>,
}

impl TerminalCanvas<Stdout> {
    /// Create a canvas writing to standard output.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalCanvas<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalCanvas<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            arena: None,
            grid: None,
            robot_at: None,
        }
    }

    /// Switch to the alternate screen and hide the cursor.
    pub fn init(&mut self) -> CanvasResult {
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(())
    }

    /// Restore the terminal. Errors are ignored.
    pub fn close(&mut self) {
        let _ = execute!(self.out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&mut self, m: i32, p: Point, text: &str, fg: Color, bg: Color) -> io::Result<()> {
        let col = u16::try_from((m + p.x) * 2).unwrap_or(u16::MAX);
        let row = u16::try_from(m + p.y).unwrap_or(u16::MAX);
        queue!(
            self.out,
            cursor::MoveTo(col, row),
            SetForegroundColor(to_ct_color(fg)),
            SetBackgroundColor(to_ct_color(bg)),
            Print(text)
        )
    }

    /// Paint one cell of the arena layer. Markers belong to the robot layer
    /// and show as floor here.
    fn paint_tile(&mut self, m: i32, p: Point, tile: Tile, background: Color) -> io::Result<()> {
        match tile {
            Tile::Empty | Tile::Marker => self.paint(m, p, " .", FLOOR_DOT, FLOOR),
            Tile::Obstacle => self.paint(m, p, "  ", OBSTACLE, OBSTACLE),
            Tile::Void => self.paint(m, p, "  ", background, background),
        }
    }

    fn paint_arena(&mut self, grid: &Grid, style: &ArenaStyle) -> io::Result<()> {
        let m = margin(style);
        for (p, tile) in grid.iter() {
            self.paint_tile(m, p, tile, style.background)?;
        }
        queue!(self.out, ResetColor)
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn draw_arena(&mut self, grid: &Grid, style: &ArenaStyle) -> CanvasResult {
        let m = margin(style);
        let cols = usize::try_from((grid.width() + 2 * m) * 2).unwrap_or(0);
        let blank = " ".repeat(cols);
        queue!(self.out, terminal::Clear(ClearType::All))?;
        for row in 0..grid.height() + 2 * m {
            queue!(
                self.out,
                cursor::MoveTo(0, u16::try_from(row).unwrap_or(u16::MAX)),
                SetBackgroundColor(to_ct_color(style.background)),
                Print(&blank)
            )?;
        }
        self.paint_arena(grid, style)?;
        self.arena = Some(*style);
        self.grid = Some(grid.clone());
        self.robot_at = None;
        Ok(())
    }

    fn draw_robot(
        &mut self,
        robot: &Robot,
        grid: &Grid,
        arena: &ArenaStyle,
        style: &RobotStyle,
    ) -> CanvasResult {
        let m = margin(arena);
        if let Some((p, tile)) = self.robot_at.take().and_then(|p| Some((p, grid.at(p)?))) {
            self.paint_tile(m, p, tile, arena.background)?;
        }
        for (p, tile) in grid.iter() {
            if tile == Tile::Marker {
                self.paint(m, p, "  ", MARKER, MARKER)?;
            }
        }
        self.paint(m, robot.home(), "><", style.border, FLOOR)?;
        let pos = robot.position();
        self.paint(m, pos, arrow(robot.direction()), style.fill, style.border)?;
        queue!(self.out, ResetColor)?;
        self.robot_at = Some(pos);
        self.grid = Some(grid.clone());
        Ok(())
    }

    fn clear_arena(&mut self) -> CanvasResult {
        queue!(self.out, ResetColor, terminal::Clear(ClearType::All))?;
        self.arena = None;
        self.grid = None;
        self.robot_at = None;
        Ok(())
    }

    fn clear_robot(&mut self) -> CanvasResult {
        if let (Some(grid), Some(style)) = (self.grid.take(), self.arena) {
            self.paint_arena(&grid, &style)?;
            self.grid = Some(grid);
        }
        self.robot_at = None;
        Ok(())
    }

    fn present(&mut self) -> CanvasResult {
        self.out.flush()?;
        Ok(())
    }
}
