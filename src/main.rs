mod display;
mod logging;

use std::io::{self, stdout, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use tracing::{info, warn};

use password_grid::compute::{
    apply, decode_cells, encode, init_state, parse_cells, set_etanks, Command,
};
use password_grid::entities::{Boss, Grid, SessionState, BOSS_COUNT};

use display::{View, BOSS_COLUMNS};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "password_grid")]
#[command(about = "Generate the stage-select password for a set of defeated bosses")]
struct Args {
    /// Bosses already defeated, comma separated (e.g. `air_man,metal`)
    #[arg(long, value_name = "BOSS", value_delimiter = ',', conflicts_with = "decode")]
    defeated: Vec<Boss>,

    /// E Tanks held
    #[arg(
        long,
        value_name = "COUNT",
        conflicts_with = "decode",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=4)
    )]
    etanks: u8,

    /// Print the password and exit instead of opening the interactive screen
    #[arg(long, conflicts_with = "decode")]
    print: bool,

    /// Decode a password given as marked cells (e.g. "A1 C3 D2 ...") and exit
    #[arg(long, value_name = "CELLS")]
    decode: Option<String>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn interactive(&self) -> bool {
        !self.print && self.decode.is_none()
    }

    /// Session described by `--defeated` and `--etanks`.
    fn start_state(&self) -> SessionState {
        let state = set_etanks(&init_state(), self.etanks);
        self.defeated.iter().fold(state, |state, &boss| {
            if state.is_alive(boss) {
                apply(&state, Command::Toggle(boss))
            } else {
                state
            }
        })
    }
}

fn invalid_data<E: std::error::Error + Send + Sync + 'static>(err: E) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

// ── Key handling ──────────────────────────────────────────────────────────────

enum Action {
    Quit,
    MoveCursor { dx: isize, dy: isize },
    ToggleSelected,
    Apply(Command),
    Ignore,
}

fn action_for(code: KeyCode, modifiers: KeyModifiers) -> Action {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,

        KeyCode::Left | KeyCode::Char('h') => Action::MoveCursor { dx: -1, dy: 0 },
        KeyCode::Right | KeyCode::Char('l') => Action::MoveCursor { dx: 1, dy: 0 },
        KeyCode::Up | KeyCode::Char('k') => Action::MoveCursor { dx: 0, dy: -1 },
        KeyCode::Down | KeyCode::Char('j') => Action::MoveCursor { dx: 0, dy: 1 },

        KeyCode::Char(' ') | KeyCode::Enter => Action::ToggleSelected,
        KeyCode::Char(d @ '1'..='8') => {
            let index = d as usize - '1' as usize;
            Action::Apply(Command::Toggle(Boss::ALL[index]))
        }

        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char(']') => {
            Action::Apply(Command::IncrementEtanks)
        }
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Char('[') => {
            Action::Apply(Command::DecrementEtanks)
        }
        KeyCode::Char('d') | KeyCode::Char('D') => Action::Apply(Command::DefeatAll),
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Apply(Command::Reset),
        _ => Action::Ignore,
    }
}

/// Move the boss cursor around the panel, wrapping at the edges.
fn move_cursor(cursor: usize, dx: isize, dy: isize) -> usize {
    let cols = BOSS_COLUMNS as isize;
    let rows = (BOSS_COUNT / BOSS_COLUMNS) as isize;
    let col = (cursor as isize % cols + dx).rem_euclid(cols);
    let row = (cursor as isize / cols + dy).rem_euclid(rows);
    (row * cols + col) as usize
}

// ── Interactive session ───────────────────────────────────────────────────────

/// Redraw after every key. The grid is recomputed from scratch each time.
fn session_loop<W: Write>(out: &mut W, mut state: SessionState) -> io::Result<()> {
    let mut cursor = 0usize;

    loop {
        let grid = encode(&state).map_err(invalid_data)?;
        display::render(
            out,
            &View {
                state: &state,
                grid: &grid,
                cursor,
            },
        )?;

        // Resize and other events just fall through to a redraw.
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event::read()?
        else {
            continue;
        };
        if kind != KeyEventKind::Press {
            continue;
        }

        match action_for(code, modifiers) {
            Action::Quit => return Ok(()),
            Action::MoveCursor { dx, dy } => cursor = move_cursor(cursor, dx, dy),
            Action::ToggleSelected => {
                state = apply(&state, Command::Toggle(Boss::ALL[cursor]));
            }
            Action::Apply(command) => state = apply(&state, command),
            Action::Ignore => {}
        }
    }
}

fn run_interactive(state: SessionState) -> io::Result<()> {
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    let result = session_loop(&mut out, state);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

// ── One-shot modes ────────────────────────────────────────────────────────────

fn print_summary<W: Write>(out: &mut W, state: &SessionState, grid: &Grid) -> io::Result<()> {
    writeln!(out, "E Tanks: {}", state.etanks)?;
    for boss in Boss::ALL {
        let status = if state.is_alive(boss) { "alive" } else { "defeated" };
        writeln!(out, "  {:<12} {}", boss.name(), status)?;
    }
    writeln!(out)?;
    write!(out, "{}", grid)?;

    let cells: Vec<String> = grid.marked_cells().iter().map(|c| c.to_string()).collect();
    writeln!(out)?;
    writeln!(out, "Password: {}", cells.join(" "))?;
    Ok(())
}

fn run_print(state: SessionState) -> io::Result<()> {
    let grid = encode(&state).map_err(invalid_data)?;
    print_summary(&mut stdout().lock(), &state, &grid)
}

fn run_decode(text: &str) -> io::Result<()> {
    let cells = parse_cells(text).map_err(|e| {
        warn!(error = %e, "rejected cell list");
        invalid_data(e)
    })?;
    let state = decode_cells(&cells).map_err(|e| {
        warn!(error = %e, "rejected password");
        invalid_data(e)
    })?;
    print_summary(&mut stdout().lock(), &state, &Grid::from_cells(cells))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let args = Args::parse();

    match &args.log_file {
        Some(path) => logging::init_file(path)?,
        None if !args.interactive() => logging::init_stderr(),
        None => {}
    }

    if let Some(text) = &args.decode {
        info!("decoding password");
        return run_decode(text);
    }

    let state = args.start_state();
    info!(
        etanks = state.etanks,
        defeated = state.defeated().count(),
        interactive = args.interactive(),
        "starting"
    );

    if args.print {
        run_print(state)
    } else {
        run_interactive(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use password_grid::compute::toggle_boss;

    fn markers_drawn(state: &SessionState) -> usize {
        let grid = encode(state).unwrap();
        let mut out: Vec<u8> = Vec::new();
        display::render(
            &mut out,
            &View {
                state,
                grid: &grid,
                cursor: 0,
            },
        )
        .unwrap();
        String::from_utf8(out).unwrap().matches(display::MARKER).count()
    }

    #[test]
    fn render_draws_one_marker_per_marked_cell() {
        for etanks in 0..=4 {
            let state = set_etanks(&init_state(), etanks);
            assert_eq!(markers_drawn(&state), 9, "etanks {}", etanks);

            let defeated = toggle_boss(&state, Boss::MetalMan);
            assert_eq!(markers_drawn(&defeated), 9, "etanks {}", etanks);
        }
    }

    #[test]
    fn repeated_defeated_boss_stays_defeated() {
        let args = Args::parse_from(["password_grid", "--defeated", "air,air", "--etanks", "2"]);
        let state = args.start_state();
        assert_eq!(state.defeated().collect::<Vec<_>>(), vec![Boss::AirMan]);
        assert_eq!(state.etanks, 2);
    }

    #[test]
    fn decode_conflicts_with_start_state_flags() {
        let result = Args::try_parse_from(["password_grid", "--decode", "A1", "--etanks", "1"]);
        assert!(result.is_err());
        let result = Args::try_parse_from(["password_grid", "--decode", "A1", "--defeated", "air"]);
        assert!(result.is_err());
    }

    #[test]
    fn cursor_wraps_at_both_edges() {
        assert_eq!(move_cursor(3, 1, 0), 0);
        assert_eq!(move_cursor(7, 1, 0), 4);
        assert_eq!(move_cursor(0, -1, 0), 3);
        assert_eq!(move_cursor(0, 0, -1), 4);
        assert_eq!(move_cursor(5, 0, 1), 1);
        assert_eq!(move_cursor(2, 1, 1), 7);
    }

    #[test]
    fn digit_keys_toggle_bosses_in_table_order() {
        for (i, boss) in Boss::ALL.into_iter().enumerate() {
            let key = KeyCode::Char((b'1' + i as u8) as char);
            match action_for(key, KeyModifiers::NONE) {
                Action::Apply(Command::Toggle(toggled)) => assert_eq!(toggled, boss),
                _ => panic!("key {:?} did not toggle a boss", key),
            }
        }
        assert!(matches!(
            action_for(KeyCode::Char('9'), KeyModifiers::NONE),
            Action::Ignore
        ));
    }
}
