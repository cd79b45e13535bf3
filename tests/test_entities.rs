use password_grid::entities::*;
use password_grid::error::{BossParseError, CellError, CellParseError};

// ── Cell ──────────────────────────────────────────────────────────────────────

#[test]
fn cell_parse_and_display() {
    let c: Cell = "C3".parse().unwrap();
    assert_eq!(c.row(), 2);
    assert_eq!(c.col(), 2);
    assert_eq!(c.index(), 12);
    assert_eq!(c.to_string(), "C3");

    let lower: Cell = " e5 ".parse().unwrap();
    assert_eq!(lower.to_string(), "E5");
    assert_eq!(lower.index(), 24);
}

#[test]
fn cell_parse_errors() {
    assert_eq!(
        "".parse::<Cell>(),
        Err(CellParseError::BadLength { input: String::new() })
    );
    assert_eq!(
        "F2".parse::<Cell>(),
        Err(CellParseError::BadRow { input: "F2".to_string() })
    );
    assert_eq!(
        "B0".parse::<Cell>(),
        Err(CellParseError::BadCol { input: "B0".to_string() })
    );
}

#[test]
fn cell_new_validates_range() {
    assert!(Cell::new(4, 4).is_ok());
    assert_eq!(Cell::new(5, 0), Err(CellError::RowOutOfRange { row: 5 }));
    assert_eq!(Cell::new(0, 5), Err(CellError::ColOutOfRange { col: 5 }));
}

#[test]
fn cell_index_round_trip() {
    for index in 0..25u8 {
        assert_eq!(Cell::from_index(index).unwrap().index(), index);
    }
    assert!(Cell::from_index(25).is_err());
}

#[test]
fn item_marker_is_a1() {
    assert_eq!(Cell::ITEM_MARKER, Cell::new(0, 0).unwrap());
    assert_eq!(Cell::lit(b"D4"), "D4".parse::<Cell>().unwrap());
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[test]
fn boss_order_matches_table() {
    for (i, boss) in Boss::ALL.into_iter().enumerate() {
        assert_eq!(boss.index(), i);
        assert_eq!(BOSS_TABLE[i].boss, boss);
        assert_eq!(boss.definition().boss, boss);
    }
}

#[test]
fn boss_table_cells_are_distinct_and_off_row_a() {
    let mut seen: Vec<Cell> = BOSS_TABLE.iter().flat_map(|d| [d.alive, d.dead]).collect();
    assert!(seen.iter().all(|c| c.row() > 0));
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 2 * BOSS_COUNT);
}

#[test]
fn boss_parse_accepts_ids_names_and_numbers() {
    assert_eq!("bubble_man".parse::<Boss>(), Ok(Boss::BubbleMan));
    assert_eq!("Air Man".parse::<Boss>(), Ok(Boss::AirMan));
    assert_eq!("METAL".parse::<Boss>(), Ok(Boss::MetalMan));
    assert_eq!("crash-man".parse::<Boss>(), Ok(Boss::CrashMan));
    assert_eq!("3".parse::<Boss>(), Ok(Boss::QuickMan));
    assert_eq!("8".parse::<Boss>(), Ok(Boss::CrashMan));
}

#[test]
fn boss_parse_rejects_unknown() {
    assert_eq!(
        "proto_man".parse::<Boss>(),
        Err(BossParseError::Unknown { input: "proto_man".to_string() })
    );
    assert!("9".parse::<Boss>().is_err());
    assert!("".parse::<Boss>().is_err());
}

#[test]
fn boss_display_uses_name() {
    assert_eq!(Boss::FlashMan.to_string(), "Flash Man");
    assert_eq!(Boss::FlashMan.id(), "flash_man");
}

#[test]
fn definition_cell_for_state() {
    let def = Boss::HeatMan.definition();
    assert_eq!(def.cell_for(true).to_string(), "D5");
    assert_eq!(def.cell_for(false).to_string(), "B2");
}

// ── SessionState ──────────────────────────────────────────────────────────────

#[test]
fn session_state_copy_is_independent() {
    let original = SessionState::default();
    let mut copy = original;

    copy.alive[Boss::WoodMan.index()] = false;
    copy.etanks = 3;

    assert!(original.is_alive(Boss::WoodMan));
    assert_eq!(original.etanks, 0);
    assert_eq!(copy.defeated().collect::<Vec<_>>(), vec![Boss::WoodMan]);
}

// ── Grid ──────────────────────────────────────────────────────────────────────

#[test]
fn grid_from_cells_and_queries() {
    let grid = Grid::from_cells(["B2", "A1", "E5", "A1"].map(|n| n.parse::<Cell>().unwrap()));
    assert_eq!(grid.marked_count(), 3);
    assert!(grid.is_marked("E5".parse().unwrap()));
    assert!(!grid.is_marked("C3".parse().unwrap()));
    let names: Vec<String> = grid.marked_cells().iter().map(|c| c.to_string()).collect();
    assert_eq!(names, vec!["A1", "B2", "E5"]);
}

#[test]
fn grid_display_layout() {
    let grid = Grid::from_cells(["A1", "C3"].map(|n| n.parse::<Cell>().unwrap()));
    let expected = "  1 2 3 4 5\n\
                    A ● · · · ·\n\
                    B · · · · ·\n\
                    C · · ● · ·\n\
                    D · · · · ·\n\
                    E · · · · ·\n";
    assert_eq!(grid.to_string(), expected);
}

#[test]
fn empty_grid_has_no_marks() {
    assert_eq!(Grid::new().marked_count(), 0);
    assert!(Grid::new().marked_cells().is_empty());
}
