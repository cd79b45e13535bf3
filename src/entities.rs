//! Password data types: pure data plus parsing and formatting, no encoding logic.

use std::fmt;
use std::str::FromStr;

use crate::error::{BossParseError, CellError, CellParseError};

/// Rows and columns in the password grid.
pub const GRID_SIZE: usize = 5;

/// Most E Tanks the password can carry.
pub const MAX_ETANKS: u8 = 4;

pub const BOSS_COUNT: usize = 8;

// ── Cells ─────────────────────────────────────────────────────────────────────

/// One square of the password grid. Rows are lettered A-E, columns numbered 1-5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    /// The E Tank indicator before any shift.
    pub const ITEM_MARKER: Cell = Cell::lit(b"A1");

    pub fn new(row: u8, col: u8) -> Result<Self, CellError> {
        if row as usize >= GRID_SIZE {
            return Err(CellError::RowOutOfRange { row });
        }
        if col as usize >= GRID_SIZE {
            return Err(CellError::ColOutOfRange { col });
        }
        Ok(Cell { row, col })
    }

    /// Build a cell from its printed name at compile time, e.g. `Cell::lit(b"C3")`.
    ///
    /// # Panics
    ///
    /// Panics if the row is not `A`-`E` or the column not `1`-`5`. In a const
    /// context that is a compile error; use [`str::parse`] for runtime input.
    pub const fn lit(name: &[u8; 2]) -> Cell {
        assert!(name[0] >= b'A' && name[0] <= b'E');
        assert!(name[1] >= b'1' && name[1] <= b'5');
        Cell {
            row: name[0] - b'A',
            col: name[1] - b'1',
        }
    }

    /// Inverse of [`Cell::index`].
    pub fn from_index(index: u8) -> Result<Self, CellError> {
        let size = GRID_SIZE as u8;
        Cell::new(index / size, index % size)
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Row-major position, `row * 5 + col`.
    pub fn index(self) -> u8 {
        self.row * GRID_SIZE as u8 + self.col
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.row) as char, self.col + 1)
    }
}

impl FromStr for Cell {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let mut chars = input.chars();
        let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CellParseError::BadLength {
                input: input.to_string(),
            });
        };

        let row = match letter.to_ascii_uppercase() {
            l @ 'A'..='E' => l as u8 - b'A',
            _ => {
                return Err(CellParseError::BadRow {
                    input: input.to_string(),
                })
            }
        };
        let col = match digit {
            d @ '1'..='5' => d as u8 - b'1',
            _ => {
                return Err(CellParseError::BadCol {
                    input: input.to_string(),
                })
            }
        };

        Ok(Cell { row, col })
    }
}

// ── Bosses ────────────────────────────────────────────────────────────────────

/// The eight Robot Masters, in the order the password table lists them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Boss {
    BubbleMan,
    AirMan,
    QuickMan,
    HeatMan,
    WoodMan,
    MetalMan,
    FlashMan,
    CrashMan,
}

impl Boss {
    pub const ALL: [Boss; BOSS_COUNT] = [
        Boss::BubbleMan,
        Boss::AirMan,
        Boss::QuickMan,
        Boss::HeatMan,
        Boss::WoodMan,
        Boss::MetalMan,
        Boss::FlashMan,
        Boss::CrashMan,
    ];

    /// Position in [`Boss::ALL`] and in `SessionState::alive`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn id(self) -> &'static str {
        match self {
            Boss::BubbleMan => "bubble_man",
            Boss::AirMan => "air_man",
            Boss::QuickMan => "quick_man",
            Boss::HeatMan => "heat_man",
            Boss::WoodMan => "wood_man",
            Boss::MetalMan => "metal_man",
            Boss::FlashMan => "flash_man",
            Boss::CrashMan => "crash_man",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Boss::BubbleMan => "Bubble Man",
            Boss::AirMan => "Air Man",
            Boss::QuickMan => "Quick Man",
            Boss::HeatMan => "Heat Man",
            Boss::WoodMan => "Wood Man",
            Boss::MetalMan => "Metal Man",
            Boss::FlashMan => "Flash Man",
            Boss::CrashMan => "Crash Man",
        }
    }

    pub fn definition(self) -> &'static BossDefinition {
        &BOSS_TABLE[self.index()]
    }
}

impl fmt::Display for Boss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Boss {
    type Err = BossParseError;

    /// Accepts `bubble_man`, `Bubble Man`, `bubble` or the 1-based table position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if let Ok(n) = wanted.parse::<usize>() {
            if (1..=BOSS_COUNT).contains(&n) {
                return Ok(Boss::ALL[n - 1]);
            }
        }

        Boss::ALL
            .into_iter()
            .find(|boss| {
                let full = boss.id().replace('_', "");
                full == wanted || full.strip_suffix("man") == Some(wanted.as_str())
            })
            .ok_or_else(|| BossParseError::Unknown {
                input: s.trim().to_string(),
            })
    }
}

/// Where a boss sits on the grid at zero E Tanks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossDefinition {
    pub boss: Boss,
    pub alive: Cell,
    pub dead: Cell,
}

impl BossDefinition {
    pub fn cell_for(&self, alive: bool) -> Cell {
        if alive {
            self.alive
        } else {
            self.dead
        }
    }
}

pub const BOSS_TABLE: [BossDefinition; BOSS_COUNT] = [
    BossDefinition {
        boss: Boss::BubbleMan,
        alive: Cell::lit(b"C3"),
        dead: Cell::lit(b"D1"),
    },
    BossDefinition {
        boss: Boss::AirMan,
        alive: Cell::lit(b"D2"),
        dead: Cell::lit(b"E3"),
    },
    BossDefinition {
        boss: Boss::QuickMan,
        alive: Cell::lit(b"C4"),
        dead: Cell::lit(b"B4"),
    },
    BossDefinition {
        boss: Boss::HeatMan,
        alive: Cell::lit(b"D5"),
        dead: Cell::lit(b"B2"),
    },
    BossDefinition {
        boss: Boss::WoodMan,
        alive: Cell::lit(b"B5"),
        dead: Cell::lit(b"D3"),
    },
    BossDefinition {
        boss: Boss::MetalMan,
        alive: Cell::lit(b"E1"),
        dead: Cell::lit(b"E5"),
    },
    BossDefinition {
        boss: Boss::FlashMan,
        alive: Cell::lit(b"E4"),
        dead: Cell::lit(b"C1"),
    },
    BossDefinition {
        boss: Boss::CrashMan,
        alive: Cell::lit(b"E2"),
        dead: Cell::lit(b"C5"),
    },
];

// ── Session state ─────────────────────────────────────────────────────────────

/// Everything the password encodes. Pure transitions in `compute` return a
/// fresh copy instead of mutating this one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// Indexed by [`Boss::index`]; `true` means the boss is still alive.
    pub alive: [bool; BOSS_COUNT],
    pub etanks: u8,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState {
            alive: [true; BOSS_COUNT],
            etanks: 0,
        }
    }
}

impl SessionState {
    pub fn is_alive(&self, boss: Boss) -> bool {
        self.alive[boss.index()]
    }

    pub fn defeated(&self) -> impl Iterator<Item = Boss> + '_ {
        Boss::ALL.into_iter().filter(|&boss| !self.is_alive(boss))
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// The 5x5 password. Always rebuilt from scratch, never patched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [[bool; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Self {
        let mut grid = Grid::new();
        for cell in cells {
            grid.mark(cell);
        }
        grid
    }

    pub fn mark(&mut self, cell: Cell) {
        self.cells[cell.row as usize][cell.col as usize] = true;
    }

    pub fn is_marked(&self, cell: Cell) -> bool {
        self.cells[cell.row as usize][cell.col as usize]
    }

    pub fn row(&self, row: usize) -> &[bool; GRID_SIZE] {
        &self.cells[row]
    }

    /// Marked cells in row-major order.
    pub fn marked_cells(&self) -> Vec<Cell> {
        (0..GRID_SIZE as u8)
            .flat_map(|row| (0..GRID_SIZE as u8).map(move |col| Cell { row, col }))
            .filter(|&cell| self.is_marked(cell))
            .collect()
    }

    pub fn marked_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&m| m).count()
    }
}

impl fmt::Display for Grid {
    /// ```text
    ///   1 2 3 4 5
    /// A ● · · · ·
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 1..=GRID_SIZE {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, "{}", (b'A' + r as u8) as char)?;
            for &marked in row {
                write!(f, " {}", if marked { '●' } else { '·' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
