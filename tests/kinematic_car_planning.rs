//! End-to-end planning scenarios with stub search capabilities

use std::f64::consts::PI;
use std::sync::Arc;
use std::thread;

use rust_kinoplan::control_planning::{
    ControlModel, ControlPath, ControlStep, PlanningConfig, PlanningProblem, PoseSpace,
    TurnAndDrive,
};
use rust_kinoplan::{
    ControlInput, PlanningError, PlanningFailure, Pose2D, SearchCapability, SearchReport,
    SearchRequest,
};

/// Rotates toward the goal and drives the straight line to it, in one
/// step each, at the control bound magnitudes
struct StraightLine;

impl SearchCapability for StraightLine {
    fn search(&mut self, request: &SearchRequest<'_>) -> SearchReport {
        let v = request.control_bounds.high()[0];
        let w = request.control_bounds.high()[1];
        let dx = request.goal.x - request.start.x;
        let dy = request.goal.y - request.start.y;
        let turn = dy.atan2(dx) - request.start.yaw;
        let (omega, turn_time) = if turn >= 0.0 { (w, turn / w) } else { (-w, -turn / w) };

        SearchReport::found(vec![
            ControlStep::new(ControlInput::new(0.0, omega), turn_time),
            ControlStep::new(ControlInput::new(v, 0.0), (dx * dx + dy * dy).sqrt() / v),
        ])
    }
}

/// Never finds anything
struct Exhausted {
    calls: usize,
}

impl SearchCapability for Exhausted {
    fn search(&mut self, _request: &SearchRequest<'_>) -> SearchReport {
        self.calls += 1;
        SearchReport::not_found()
    }
}

fn shared_setup() -> (Arc<PoseSpace>, Arc<ControlModel>) {
    (
        Arc::new(PoseSpace::square(-1.0, 1.0).unwrap()),
        Arc::new(ControlModel::symmetric(-0.3, 0.3).unwrap()),
    )
}

fn car_problem(start: Pose2D, goal: Pose2D) -> PlanningProblem {
    let (space, model) = shared_setup();
    PlanningProblem::new(space, model, start, goal, 0.05)
}

#[test]
fn straight_line_stub_reaches_goal() {
    env_logger::try_init().ok();

    let problem = car_problem(Pose2D::new(-0.5, 0.0, 0.0), Pose2D::new(0.0, 0.5, 0.0));
    let path = problem
        .solve(&mut StraightLine, 20.0)
        .expect("well-formed problem")
        .expect("straight line is feasible");

    let end = path.final_pose(problem.propagator(), problem.start()).unwrap();
    assert!(end.position().distance(&Pose2D::new(0.0, 0.5, 0.0).position()) <= 0.05);
}

#[test]
fn zero_time_budget_is_invalid_problem() {
    let problem = car_problem(Pose2D::new(-0.5, 0.0, 0.0), Pose2D::new(0.0, 0.5, 0.0));
    let mut search = Exhausted { calls: 0 };

    let err = problem.solve(&mut search, 0.0).unwrap_err();
    assert!(matches!(err, PlanningError::InvalidProblem { field: "time_budget", .. }));
    assert_eq!(search.calls, 0);
}

#[test]
fn start_outside_bounds_never_invokes_search() {
    let problem = car_problem(Pose2D::new(-1.5, 0.0, 0.0), Pose2D::new(0.0, 0.5, 0.0));
    let mut search = Exhausted { calls: 0 };

    let err = problem.solve(&mut search, 20.0).unwrap_err();
    assert_eq!(err.problem_field(), Some("start"));
    assert_eq!(search.calls, 0);
}

#[test]
fn goal_outside_bounds_never_invokes_search() {
    let problem = car_problem(Pose2D::new(-0.5, 0.0, 0.0), Pose2D::new(0.0, 1.01, 0.0));
    let mut search = Exhausted { calls: 0 };

    let err = problem.solve(&mut search, 20.0).unwrap_err();
    assert_eq!(err.problem_field(), Some("goal"));
    assert_eq!(search.calls, 0);
}

#[test]
fn exhausted_search_is_not_found() {
    let problem = car_problem(Pose2D::new(-0.5, 0.0, 0.0), Pose2D::new(0.0, 0.5, 0.0));
    let mut search = Exhausted { calls: 0 };

    let outcome = problem.solve(&mut search, 20.0).unwrap();
    assert_eq!(outcome, Err(PlanningFailure::NotFound));
    assert_eq!(search.calls, 1);
}

#[test]
fn turn_and_drive_solves_default_config() {
    let config = PlanningConfig::default();
    let problem = config.build_problem().unwrap();
    let mut steering = TurnAndDrive::new(config.steering());

    let path = problem.solve(&mut steering, config.time_budget).unwrap().unwrap();
    let poses = path
        .interpolate(problem.propagator(), problem.start(), config.interpolation_step)
        .unwrap();

    assert!(poses.iter().all(|p| problem.space().contains(p)));
    assert!(problem.is_goal_satisfied(poses.last().unwrap()));
}

#[test]
fn huge_start_yaw_still_returns() {
    let problem = car_problem(Pose2D::new(-0.5, 0.0, 1e17), Pose2D::new(0.0, 0.5, 0.0))
        .with_yaw_tolerance(PI);

    assert!(problem.solve(&mut TurnAndDrive::with_defaults(), 20.0).is_ok());
    assert!(problem.is_goal_satisfied(&Pose2D::new(0.0, 0.5, -1e17)));
}

#[test]
fn custom_validity_blocks_turn_and_drive() {
    // a wall at x = -0.25 cuts the straight line from start to goal
    let problem = car_problem(Pose2D::new(-0.5, 0.0, 0.0), Pose2D::new(0.0, 0.5, 0.0))
        .with_validity_checker(Arc::new(|p: &Pose2D| p.x < -0.25));

    let outcome = problem.solve(&mut TurnAndDrive::with_defaults(), 20.0).unwrap();
    assert_eq!(outcome, Err(PlanningFailure::NotFound));
}

#[test]
fn concurrent_problems_share_spaces() {
    let (space, model) = shared_setup();
    let goals = [(0.0, 0.5), (0.5, -0.5), (-0.9, 0.9), (0.8, 0.0)];

    let handles: Vec<_> = goals
        .iter()
        .map(|&(gx, gy)| {
            let problem = PlanningProblem::new(
                Arc::clone(&space),
                Arc::clone(&model),
                Pose2D::new(-0.5, 0.0, 0.0),
                Pose2D::new(gx, gy, 0.0),
                0.05,
            );
            thread::spawn(move || problem.solve(&mut TurnAndDrive::with_defaults(), 20.0))
        })
        .collect();

    for handle in handles {
        let path: ControlPath = handle.join().unwrap().unwrap().unwrap();
        assert!(!path.is_empty());
    }
}
