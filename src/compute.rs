//! Pure password logic.
//!
//! Every transition takes the current `SessionState` by reference and returns
//! a new one. The grid is never patched in place: callers re-run [`encode`]
//! after each transition.
//!
//! The game packs its password into 25 bits. Eight of the first twenty carry
//! boss state and one of the last five carries the E Tank count, which shifts
//! every boss bit. Here that is a right shift along the grid: each E Tank
//! pushes a cell one column on, and falling off row E wraps to row B because
//! row A belongs to the E Tank marker.

use tracing::{debug, trace};

use crate::entities::{
    Boss, BossDefinition, Cell, Grid, SessionState, BOSS_COUNT, BOSS_TABLE, GRID_SIZE, MAX_ETANKS,
};
use crate::error::{CellParseError, DecodeError, EncodeError};

/// Marks per valid password: one per boss plus the E Tank marker.
pub const MARKS_PER_GRID: usize = BOSS_COUNT + 1;

// ── Constructors ──────────────────────────────────────────────────────────────

/// All bosses alive, no E Tanks.
pub fn init_state() -> SessionState {
    SessionState::default()
}

// ── Input-driven state transitions (pure) ────────────────────────────────────

/// A single user action on the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Toggle(Boss),
    IncrementEtanks,
    DecrementEtanks,
    DefeatAll,
    Reset,
}

pub fn toggle_boss(state: &SessionState, boss: Boss) -> SessionState {
    let mut alive = state.alive;
    alive[boss.index()] = !alive[boss.index()];
    debug!(boss = boss.id(), alive = alive[boss.index()], "toggled boss");
    SessionState { alive, ..*state }
}

/// Clamp `etanks` into `0..=MAX_ETANKS`.
pub fn set_etanks(state: &SessionState, etanks: u8) -> SessionState {
    let etanks = etanks.min(MAX_ETANKS);
    debug!(etanks, "set E Tanks");
    SessionState { etanks, ..*state }
}

pub fn increment_etanks(state: &SessionState) -> SessionState {
    set_etanks(state, state.etanks.saturating_add(1))
}

pub fn decrement_etanks(state: &SessionState) -> SessionState {
    set_etanks(state, state.etanks.saturating_sub(1))
}

/// Every boss defeated; the E Tank count is kept.
pub fn defeat_all(state: &SessionState) -> SessionState {
    debug!("defeated all bosses");
    SessionState {
        alive: [false; BOSS_COUNT],
        ..*state
    }
}

pub fn reset(_state: &SessionState) -> SessionState {
    debug!("reset session");
    init_state()
}

pub fn apply(state: &SessionState, command: Command) -> SessionState {
    match command {
        Command::Toggle(boss) => toggle_boss(state, boss),
        Command::IncrementEtanks => increment_etanks(state),
        Command::DecrementEtanks => decrement_etanks(state),
        Command::DefeatAll => defeat_all(state),
        Command::Reset => reset(state),
    }
}

// ── Encoding ──────────────────────────────────────────────────────────────────

/// Move `cell` right by `etanks` columns, wrapping row by row. Overflow past
/// row E lands on row B, never row A.
pub fn shift_cell(cell: Cell, etanks: u8) -> Result<Cell, EncodeError> {
    if etanks > MAX_ETANKS {
        return Err(EncodeError::ItemCountOutOfRange { etanks });
    }

    let size = GRID_SIZE as u8;
    let shifted = cell.index() + etanks;
    let row = match shifted / size {
        5 => 1,
        row => row,
    };

    Cell::new(row, shifted % size).map_err(|_| EncodeError::ShiftOutOfGrid { cell, etanks })
}

/// Build the password for an explicit boss table.
pub fn encode_with(
    definitions: &[BossDefinition; BOSS_COUNT],
    alive: &[bool; BOSS_COUNT],
    etanks: u8,
) -> Result<Grid, EncodeError> {
    if etanks > MAX_ETANKS {
        return Err(EncodeError::ItemCountOutOfRange { etanks });
    }

    let selected = definitions
        .iter()
        .zip(alive)
        .map(|(def, &is_alive)| def.cell_for(is_alive))
        .chain(std::iter::once(Cell::ITEM_MARKER));

    let mut grid = Grid::new();
    for cell in selected {
        grid.mark(shift_cell(cell, etanks)?);
    }

    trace!(etanks, marks = grid.marked_count(), "encoded password");
    Ok(grid)
}

/// Build the password for the current session.
pub fn encode(state: &SessionState) -> Result<Grid, EncodeError> {
    encode_with(&BOSS_TABLE, &state.alive, state.etanks)
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// Recover the session a password was generated from.
pub fn decode(grid: &Grid) -> Result<SessionState, DecodeError> {
    let markers: Vec<usize> = grid
        .row(0)
        .iter()
        .enumerate()
        .filter(|&(_, &marked)| marked)
        .map(|(col, _)| col)
        .collect();
    let etanks = match markers.as_slice() {
        &[col] => col as u8,
        other => return Err(DecodeError::ItemMarker { found: other.len() }),
    };

    let mut alive = [true; BOSS_COUNT];
    for def in &BOSS_TABLE {
        // etanks is a column index, so both shifts stay on the grid.
        let (Ok(alive_cell), Ok(dead_cell)) =
            (shift_cell(def.alive, etanks), shift_cell(def.dead, etanks))
        else {
            return Err(DecodeError::MissingBoss { boss: def.boss });
        };

        alive[def.boss.index()] = match (grid.is_marked(alive_cell), grid.is_marked(dead_cell)) {
            (true, false) => true,
            (false, true) => false,
            (true, true) => return Err(DecodeError::AmbiguousBoss { boss: def.boss }),
            (false, false) => return Err(DecodeError::MissingBoss { boss: def.boss }),
        };
    }

    let count = grid.marked_count();
    if count != MARKS_PER_GRID {
        return Err(DecodeError::UnexpectedMarks { count });
    }

    let state = SessionState { alive, etanks };
    debug!(etanks, defeated = state.defeated().count(), "decoded password");
    Ok(state)
}

/// Decode a password given as a list of marked cells. Each cell may appear
/// only once.
pub fn decode_cells(cells: &[Cell]) -> Result<SessionState, DecodeError> {
    let mut grid = Grid::new();
    for &cell in cells {
        if grid.is_marked(cell) {
            return Err(DecodeError::DuplicateCell { cell });
        }
        grid.mark(cell);
    }
    decode(&grid)
}

/// Parse a list such as `"A3 B4,c5"` into cells.
pub fn parse_cells(text: &str) -> Result<Vec<Cell>, CellParseError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}
