//! Behavioural tests for the straight-line `DistanceOracle`.

use std::cell::RefCell;

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use voyager_core::{
    DistanceError, DistanceOracle, StraightLineOracle, TravelEstimate, TravelEstimateMatrix,
};

/// World state for oracle scenarios.
#[derive(Debug)]
struct OracleWorld {
    oracle: RefCell<StraightLineOracle>,
    matrix: RefCell<Option<Result<TravelEstimateMatrix, DistanceError>>>,
    leg: RefCell<Option<TravelEstimate>>,
}

#[fixture]
fn world() -> OracleWorld {
    OracleWorld {
        oracle: RefCell::new(StraightLineOracle::default()),
        matrix: RefCell::new(None),
        leg: RefCell::new(None),
    }
}

#[given("a straight-line oracle at 30 km/h")]
fn given_oracle(world: &OracleWorld) {
    world.oracle.replace(StraightLineOracle::new(30.0));
}

#[when("I request a matrix for three points")]
fn request_three(world: &OracleWorld) {
    let points = [
        Coord { x: -9.139, y: 38.722 },
        Coord { x: -9.150, y: 38.710 },
        Coord { x: -9.205, y: 38.697 },
    ];
    let matrix = world.oracle.borrow().estimate_matrix(&points);
    world.matrix.replace(Some(matrix));
}

#[when("I request a matrix for no points")]
fn request_none(world: &OracleWorld) {
    let matrix = world.oracle.borrow().estimate_matrix(&[]);
    world.matrix.replace(Some(matrix));
}

#[when("I estimate a 15 km leg")]
fn estimate_leg(world: &OracleWorld) {
    let leg = world.oracle.borrow().estimate_for_km(15.0);
    world.leg.replace(Some(leg));
}

#[then("a 3x3 matrix is returned")]
fn then_square(world: &OracleWorld) {
    let borrow = world.matrix.borrow();
    let matrix = borrow
        .as_ref()
        .expect("matrix requested")
        .as_ref()
        .expect("expected Ok result");
    assert_eq!(matrix.len(), 3);
    assert!(matrix.iter().all(|row| row.len() == 3));
}

#[then("the diagonal is zero")]
fn then_zero_diagonal(world: &OracleWorld) {
    let borrow = world.matrix.borrow();
    let matrix = borrow
        .as_ref()
        .expect("matrix requested")
        .as_ref()
        .expect("expected Ok result");
    for (i, row) in matrix.iter().enumerate() {
        assert_eq!(row.get(i).copied().flatten(), Some(TravelEstimate::ZERO));
    }
}

#[then("the matrix is symmetric")]
fn then_symmetric(world: &OracleWorld) {
    let borrow = world.matrix.borrow();
    let matrix = borrow
        .as_ref()
        .expect("matrix requested")
        .as_ref()
        .expect("expected Ok result");
    for (i, row) in matrix.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            let there = cell.expect("route exists").distance_km;
            let back = matrix[j][i].expect("route exists").distance_km;
            assert!((there - back).abs() < 1e-9, "asymmetric at ({i}, {j})");
        }
    }
}

#[then("an empty input error is returned")]
fn then_empty_input(world: &OracleWorld) {
    let borrow = world.matrix.borrow();
    let result = borrow.as_ref().expect("matrix requested");
    assert_eq!(result.as_ref().err(), Some(&DistanceError::EmptyInput));
}

#[then("the leg takes 30 minutes")]
fn then_thirty_minutes(world: &OracleWorld) {
    let leg = world.leg.borrow().expect("leg estimated");
    assert_eq!(leg.duration_minutes(), 30);
}

#[scenario(path = "tests/features/distance_oracle.feature", index = 0)]
fn matrix_over_three_points(world: OracleWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/distance_oracle.feature", index = 1)]
fn matrix_over_no_points(world: OracleWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/distance_oracle.feature", index = 2)]
fn travel_time_follows_speed(world: OracleWorld) {
    let _ = world;
}
