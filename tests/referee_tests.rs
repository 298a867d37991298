use battleship_ai::referee::play;
use battleship_ai::{
    Dimensions, GameRules, Orientation, Placement, PlannerConfig, Referee, RefereeError, ShotType,
    TOTAL_SHIP_CELLS,
};
use rand::{rngs::SmallRng, SeedableRng};

fn fleet(dims: Dimensions) -> Vec<Placement> {
    vec![
        Placement::new(dims, 0, 0, 5, Orientation::Horizontal).unwrap(),
        Placement::new(dims, 0, 2, 4, Orientation::Horizontal).unwrap(),
        Placement::new(dims, 9, 4, 3, Orientation::Vertical).unwrap(),
        Placement::new(dims, 4, 6, 3, Orientation::Horizontal).unwrap(),
        Placement::new(dims, 0, 8, 2, Orientation::Vertical).unwrap(),
    ]
}

#[test]
fn test_seeded_games_finish() {
    let config = PlannerConfig::default();
    for seed in 0..8 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut referee = Referee::new(&mut rng, GameRules::classic()).unwrap();
        let summary = play(&mut referee, &config).unwrap();
        assert!(referee.is_over());
        assert!(summary.turns >= TOTAL_SHIP_CELLS && summary.turns <= 100);
        assert_eq!(summary.airstrikes + summary.bombardments, 0);
        assert!(referee.remaining_ships().is_empty());
    }
}

#[test]
fn test_games_with_specials_use_them() {
    let config = PlannerConfig::default();
    let mut used = 0;
    for seed in 0..8 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let rules = GameRules::classic().with_specials(true, true);
        let mut referee = Referee::new(&mut rng, rules).unwrap();
        let summary = play(&mut referee, &config).unwrap();
        assert!(summary.turns <= 100);
        used += summary.airstrikes + summary.bombardments;
    }
    assert!(used > 0);
}

#[test]
fn test_touching_games_finish() {
    let config = PlannerConfig::default();
    let mut rng = SmallRng::seed_from_u64(42);
    let rules = GameRules::classic().with_touching(true);
    let mut referee = Referee::new(&mut rng, rules).unwrap();
    let summary = play(&mut referee, &config).unwrap();
    assert!(summary.turns <= 100);
}

#[test]
fn test_fire_resolves_hits_and_sinks() {
    let rules = GameRules::classic();
    let mut referee = Referee::with_fleet(rules.clone(), &fleet(rules.dims)).unwrap();

    let report = referee.fire(80, ShotType::Single).unwrap();
    assert_eq!(report.hits, vec![80]);
    let report = referee.fire(90, ShotType::Single).unwrap();
    assert_eq!(report.sunk, vec![2]);

    let state = referee.snapshot();
    assert_eq!(state.grid[80], 3);
    assert_eq!(state.grid[90], 3);
    assert_eq!(state.remaining_ships, vec![5, 4, 3, 3]);

    let report = referee.fire(55, ShotType::Single).unwrap();
    assert_eq!(report.misses, vec![55]);
    assert_eq!(referee.snapshot().grid[55], 1);
    assert_eq!(referee.turns(), 3);
}

#[test]
fn test_fire_rejects_resolved_cells() {
    let rules = GameRules::classic();
    let mut referee = Referee::with_fleet(rules.clone(), &fleet(rules.dims)).unwrap();
    referee.fire(55, ShotType::Single).unwrap();
    assert_eq!(
        referee.fire(55, ShotType::Single),
        Err(RefereeError::AlreadyTargeted { index: 55 })
    );
    referee.fire(0, ShotType::Single).unwrap();
    assert_eq!(
        referee.fire(0, ShotType::Single),
        Err(RefereeError::AlreadyTargeted { index: 0 })
    );
}

#[test]
fn test_specials_activate_and_reset() {
    let rules = GameRules::classic().with_specials(true, false);
    let mut referee = Referee::with_fleet(rules.clone(), &fleet(rules.dims)).unwrap();
    assert_eq!(
        referee.fire(44, ShotType::AirstrikeDownRight),
        Err(RefereeError::SpecialUnavailable(ShotType::AirstrikeDownRight))
    );
    assert_eq!(
        referee.fire(44, ShotType::Bombardment),
        Err(RefereeError::SpecialUnavailable(ShotType::Bombardment))
    );

    // sink the battleship and nick the carrier: five hits
    for idx in [20, 21, 22, 23, 1] {
        referee.fire(idx, ShotType::Single).unwrap();
    }
    assert!(referee.airstrike_activated());
    let state = referee.snapshot();
    assert!(state.airstrike_available);
    assert!(!state.bombardment_available);
    assert_eq!(state.airstrike_hit_count, 5);

    // 46, 57 and 68 all miss, and the counter restarts from zero
    let report = referee.fire(46, ShotType::AirstrikeDownRight).unwrap();
    assert_eq!(report.hits.len(), 0);
    assert!(!referee.airstrike_activated());
    assert_eq!(referee.snapshot().airstrike_hit_count, 0);
}

#[test]
fn test_special_out_of_bounds() {
    let rules = GameRules::classic().with_specials(true, true);
    let mut referee = Referee::with_fleet(rules.clone(), &fleet(rules.dims)).unwrap();
    for idx in [20, 21, 22, 23, 0, 1, 2] {
        referee.fire(idx, ShotType::Single).unwrap();
    }
    assert!(referee.bombardment_activated());
    assert_eq!(
        referee.fire(9, ShotType::Bombardment),
        Err(RefereeError::OutOfBounds { index: 9 })
    );
}

#[test]
fn test_overlapping_fleet_is_rejected() {
    let rules = GameRules::classic();
    let dims = rules.dims;
    let overlapping = vec![
        Placement::new(dims, 0, 0, 5, Orientation::Horizontal).unwrap(),
        Placement::new(dims, 2, 0, 3, Orientation::Vertical).unwrap(),
    ];
    assert!(matches!(
        Referee::with_fleet(rules.clone(), &overlapping),
        Err(RefereeError::UnableToPlaceShip)
    ));

    let touching = vec![
        Placement::new(dims, 0, 0, 5, Orientation::Horizontal).unwrap(),
        Placement::new(dims, 0, 1, 3, Orientation::Horizontal).unwrap(),
    ];
    assert!(Referee::with_fleet(rules.clone(), &touching).is_err());
    assert!(Referee::with_fleet(rules.with_touching(true), &touching).is_ok());
}
