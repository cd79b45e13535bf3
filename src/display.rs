//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! session and its grid. No password logic is performed; this module only
//! translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};
use password_grid::entities::{Boss, Grid, SessionState, GRID_SIZE, MAX_ETANKS};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Cyan;
const C_BOSS_ALIVE: Color = Color::White;
const C_BOSS_DEFEATED: Color = Color::DarkGrey;
const C_CURSOR: Color = Color::Yellow;
const C_ETANK: Color = Color::Yellow;
const C_GRID: Color = Color::DarkBlue;
const C_GRID_LABEL: Color = Color::Grey;
const C_MARK: Color = Color::Red;
const C_PASSWORD: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

// ── Layout ────────────────────────────────────────────────────────────────────

const LEFT: u16 = 2;
const TITLE_ROW: u16 = 1;
const BOSS_ROW: u16 = 3;
const ETANK_ROW: u16 = 6;
const GRID_ROW: u16 = 8;
/// Bosses per line in the selection panel.
pub const BOSS_COLUMNS: usize = 4;
const BOSS_SLOT_WIDTH: u16 = 18;
const CELL_WIDTH: u16 = 4;

/// Glyph drawn on a marked grid cell.
pub const MARKER: &str = "●";

/// What one frame shows.
pub struct View<'a> {
    pub state: &'a SessionState,
    pub grid: &'a Grid,
    /// Index into `Boss::ALL` of the highlighted boss.
    pub cursor: usize,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, view: &View<'_>) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_title(out)?;
    draw_bosses(out, view)?;
    draw_etanks(out, view.state)?;
    let below_grid = draw_grid(out, view.grid)?;
    draw_password_line(out, view.grid, below_grid + 1)?;
    draw_controls_hint(out, below_grid + 3)?;

    out.queue(style::ResetColor)?;
    out.queue(style::SetAttribute(Attribute::Reset))?;
    out.queue(cursor::MoveTo(0, below_grid + 4))?;
    out.flush()?;
    Ok(())
}

// ── Title ─────────────────────────────────────────────────────────────────────

fn draw_title<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(LEFT, TITLE_ROW))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print("★  BOSS  PASSWORD  ★"))?;
    Ok(())
}

// ── Boss panel ────────────────────────────────────────────────────────────────

fn draw_bosses<W: Write>(out: &mut W, view: &View<'_>) -> std::io::Result<()> {
    for (i, boss) in Boss::ALL.into_iter().enumerate() {
        let x = LEFT + (i % BOSS_COLUMNS) as u16 * BOSS_SLOT_WIDTH;
        let y = BOSS_ROW + (i / BOSS_COLUMNS) as u16;
        draw_boss(out, boss, view.state.is_alive(boss), i == view.cursor, x, y)?;
    }
    Ok(())
}

/// Alive bosses are drawn plainly; defeated ones are struck through and dimmed.
fn draw_boss<W: Write>(
    out: &mut W,
    boss: Boss,
    alive: bool,
    selected: bool,
    x: u16,
    y: u16,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(x, y))?;

    if selected {
        out.queue(style::SetForegroundColor(C_CURSOR))?;
        out.queue(Print("▶"))?;
    } else {
        out.queue(Print(" "))?;
    }

    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(boss.index() + 1))?;

    if alive {
        out.queue(style::SetForegroundColor(C_BOSS_ALIVE))?;
        out.queue(Print(format!(" {:<12}", boss.name())))?;
    } else {
        out.queue(style::SetForegroundColor(C_BOSS_DEFEATED))?;
        out.queue(Print("✗"))?;
        out.queue(style::SetAttribute(Attribute::CrossedOut))?;
        out.queue(Print(format!("{:<12}", boss.name())))?;
        out.queue(style::SetAttribute(Attribute::NotCrossedOut))?;
    }
    Ok(())
}

// ── E Tanks ───────────────────────────────────────────────────────────────────

fn draw_etanks<W: Write>(out: &mut W, state: &SessionState) -> std::io::Result<()> {
    let full = "◆ ".repeat(state.etanks as usize);
    let empty = "◇ ".repeat(MAX_ETANKS.saturating_sub(state.etanks) as usize);

    out.queue(cursor::MoveTo(LEFT + 1, ETANK_ROW))?;
    out.queue(style::SetForegroundColor(C_GRID_LABEL))?;
    out.queue(Print("E Tanks  "))?;
    out.queue(style::SetForegroundColor(C_ETANK))?;
    out.queue(Print(format!("{}{}", full, empty)))?;
    out.queue(style::SetForegroundColor(C_GRID_LABEL))?;
    out.queue(Print(format!(" {}/{}", state.etanks, MAX_ETANKS)))?;
    Ok(())
}

// ── Password grid ─────────────────────────────────────────────────────────────

/// Draw the boxed 5x5 grid. Returns the first free row below it.
fn draw_grid<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<u16> {
    let x0 = LEFT + 3;
    let size = GRID_SIZE as u16;

    // Column numbers
    out.queue(style::SetForegroundColor(C_GRID_LABEL))?;
    for col in 0..size {
        out.queue(cursor::MoveTo(x0 + 2 + col * CELL_WIDTH, GRID_ROW))?;
        out.queue(Print(col + 1))?;
    }

    let rule = |left: &str, mid: &str, right: &str| {
        format!("{}{}{}", left, vec!["───"; GRID_SIZE].join(mid), right)
    };

    let mut y = GRID_ROW + 1;
    out.queue(cursor::MoveTo(x0, y))?;
    out.queue(style::SetForegroundColor(C_GRID))?;
    out.queue(Print(rule("┌", "┬", "┐")))?;

    for r in 0..GRID_SIZE {
        y += 1;
        out.queue(cursor::MoveTo(LEFT + 1, y))?;
        out.queue(style::SetForegroundColor(C_GRID_LABEL))?;
        out.queue(Print((b'A' + r as u8) as char))?;

        for (c, &marked) in grid.row(r).iter().enumerate() {
            let cx = x0 + c as u16 * CELL_WIDTH;
            out.queue(cursor::MoveTo(cx, y))?;
            out.queue(style::SetForegroundColor(C_GRID))?;
            out.queue(Print("│"))?;
            if marked {
                out.queue(cursor::MoveTo(cx + 2, y))?;
                out.queue(style::SetForegroundColor(C_MARK))?;
                out.queue(Print(MARKER))?;
            }
        }
        out.queue(cursor::MoveTo(x0 + size * CELL_WIDTH, y))?;
        out.queue(style::SetForegroundColor(C_GRID))?;
        out.queue(Print("│"))?;

        y += 1;
        out.queue(cursor::MoveTo(x0, y))?;
        if r + 1 < GRID_SIZE {
            out.queue(Print(rule("├", "┼", "┤")))?;
        } else {
            out.queue(Print(rule("└", "┴", "┘")))?;
        }
    }

    Ok(y + 1)
}

fn draw_password_line<W: Write>(out: &mut W, grid: &Grid, row: u16) -> std::io::Result<()> {
    let cells: Vec<String> = grid.marked_cells().iter().map(|c| c.to_string()).collect();

    out.queue(cursor::MoveTo(LEFT + 1, row))?;
    out.queue(style::SetForegroundColor(C_GRID_LABEL))?;
    out.queue(Print("Password  "))?;
    out.queue(style::SetForegroundColor(C_PASSWORD))?;
    out.queue(Print(cells.join(" ")))?;
    Ok(())
}

// ── Controls hint ─────────────────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, row: u16) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(cursor::MoveTo(LEFT, row))?;
    out.queue(Print("← ↑ ↓ → : Select   SPACE : Toggle   1-8 : Toggle boss"))?;
    out.queue(cursor::MoveTo(LEFT, row + 1))?;
    out.queue(Print("+ - : E Tanks   D : Defeat all   R : Reset   Q : Quit"))?;
    Ok(())
}
