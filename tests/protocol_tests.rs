use battleship_ai::{
    AiService, Codec, Failure, FailureKind, GameState, Message, MoveResponse, PlanError,
    PlannerConfig, ShotType, DEFAULT_SHIPS,
};

#[test]
fn test_game_state_from_engine_json() {
    let mut grid = vec![0; 100];
    grid[45] = 2;
    let json = serde_json::json!({
        "grid": grid,
        "remaining_ships": [4, 3],
        "ships_can_touch": true,
        "airstrike": true,
        "bombardment": false,
        "airstrike_hit_count": 6,
        "bombardment_hit_count": 2,
        "airstrike_available": false,
        "bombardment_available": false,
    });
    let state: GameState = serde_json::from_value(json).unwrap();
    assert_eq!(state.grid[45], 2);
    assert_eq!(state.remaining_ships, vec![4, 3]);
    assert!(state.ships_can_touch);
    assert!(state.airstrike_allowed);
    assert!(!state.bombardment_allowed);
    assert!(state.availability().airstrike_usable());
}

#[test]
fn test_game_state_defaults_and_aliases() {
    let json = serde_json::json!({ "Grid": vec![0; 100], "AirstrikeAvailable": true });
    let state: GameState = serde_json::from_value(json).unwrap();
    assert_eq!(state.remaining_ships, DEFAULT_SHIPS.to_vec());
    assert!(!state.ships_can_touch);
    assert!(state.airstrike_available);
    assert_eq!(state.bombardment_hit_count, 0);
}

#[test]
fn test_move_response_field_names() {
    let response = MoveResponse {
        cell_index: 22,
        target: 44,
        shot_type: ShotType::AirstrikeDownRight.code(),
        pattern: ShotType::AirstrikeDownRight,
        cells: vec![22, 33, 44],
    };
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["CellIndex"], 22);
    assert_eq!(value["TargetIndex"], 44);
    assert_eq!(value["ShotType"], 1);
    assert_eq!(value["Pattern"], "AirstrikeDownRight");
    assert_eq!(value["Cells"], serde_json::json!([22, 33, 44]));
}

#[test]
fn test_wire_codes() {
    assert_eq!(ShotType::Single.code(), 0);
    assert_eq!(ShotType::AirstrikeUpRight.code(), 1);
    assert_eq!(ShotType::AirstrikeDownRight.code(), 1);
    assert_eq!(ShotType::Bombardment.code(), 2);
}

#[test]
fn test_service_decides_a_move() {
    let service = AiService::new(PlannerConfig::default());
    let mut state = GameState::new(vec![0; 100]);
    state.bombardment_available = true;
    let response = service.decide(&state).unwrap();
    assert_eq!(response.shot_type, 2);
    assert_eq!(response.pattern, ShotType::Bombardment);
    assert_eq!(response.cells.len(), 5);
    assert!(response.cells.contains(&response.cell_index));
    assert!(response.cells.contains(&response.target));
}

#[test]
fn test_failures_carry_the_error_kind() {
    let service = AiService::default();
    let err = service.decide(&GameState::new(vec![1; 100])).unwrap_err();
    assert_eq!(err, PlanError::NoLegalMove);
    let failure = Failure::from(&err);
    assert_eq!(failure.kind, FailureKind::NoLegalMove);
    assert_eq!(err.kind(), "NoLegalMove");

    let err = service.decide(&GameState::new(vec![5; 100])).unwrap_err();
    assert_eq!(Failure::from(&err).kind, FailureKind::InvalidCellState);
}

#[test]
fn test_codecs_carry_messages() {
    let msg = Message::NextMove(GameState::new(vec![0; 100]));
    for codec in [Codec::Json, Codec::Bincode] {
        let bytes = codec.encode(&msg).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), msg);
    }
    assert!(Codec::Json.decode(b"not json").is_err());
    assert_eq!("BINCODE".parse::<Codec>().unwrap(), Codec::Bincode);
    assert!("xml".parse::<Codec>().is_err());
}
