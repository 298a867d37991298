use battleship_ai::{CellState, Dimensions, Grid, PlanError};

#[test]
fn test_parse_rejects_wrong_length() {
    let err = Grid::parse(&[0; 99], 10, 10).unwrap_err();
    assert_eq!(
        err,
        PlanError::InvalidDimensions {
            width: 10,
            height: 10,
            cells: 99
        }
    );
}

#[test]
fn test_parse_rejects_oversized_board() {
    let err = Grid::parse(&[0; 144], 12, 12).unwrap_err();
    assert!(matches!(err, PlanError::InvalidDimensions { .. }));
    assert!(matches!(
        Dimensions::new(0, 10),
        Err(PlanError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_parse_rejects_unknown_code() {
    let mut codes = vec![0; 100];
    codes[17] = 4;
    let err = Grid::parse(&codes, 10, 10).unwrap_err();
    assert_eq!(err, PlanError::InvalidCellState { index: 17, code: 4 });
}

#[test]
fn test_state_lookup() {
    let mut codes = vec![0; 100];
    codes[1] = 1;
    codes[2] = 2;
    codes[3] = 3;
    let grid = Grid::parse(&codes, 10, 10).unwrap();
    assert_eq!(grid.state_of(0), Some(CellState::Unknown));
    assert_eq!(grid.state_of(1), Some(CellState::Miss));
    assert_eq!(grid.state_of(2), Some(CellState::Hit));
    assert_eq!(grid.state_of(3), Some(CellState::Sunk));
    assert_eq!(grid.state_of(100), None);
    assert_eq!(grid.to_codes(), codes);

    let states: Vec<CellState> = codes.iter().filter_map(|&c| CellState::from_code(c)).collect();
    assert_eq!(Grid::from_states(states, grid.dims()).unwrap(), grid);
    assert!(Grid::from_states(vec![CellState::Hit; 3], grid.dims()).is_err());
}

#[test]
fn test_neighbors_are_clipped() {
    let grid = Grid::parse(&[0; 100], 10, 10).unwrap();
    let corner: Vec<_> = grid.neighbors4(0).collect();
    assert_eq!(corner, vec![1, 10]);

    let edge: Vec<_> = grid.neighbors4(9).collect();
    assert_eq!(edge, vec![8, 19]);

    let mut centre: Vec<_> = grid.neighbors4(45).collect();
    centre.sort();
    assert_eq!(centre, vec![35, 44, 46, 55]);
}

#[test]
fn test_coordinates_round_trip_on_rectangular_board() {
    let dims = Dimensions::new(8, 5).unwrap();
    assert_eq!(dims.cells(), 40);
    assert_eq!(dims.index_of(7, 4), Some(39));
    assert_eq!(dims.index_of(8, 0), None);
    assert_eq!(dims.coord_of(13), (5, 1));
    assert!(dims.in_bounds(0, 0));
    assert!(!dims.in_bounds(-1, 0));
    assert!(!dims.in_bounds(0, 5));
    // no wrapping across rows
    assert_eq!(dims.offset(7, 1, 0), None);
    assert_eq!(dims.offset(8, -1, 0), None);
    assert_eq!(dims.offset(9, 1, -1), Some(2));
}
