//! End-to-end tracing of Lotka-Volterra level curves.

use approx::assert_relative_eq;
use proptest::prelude::*;

use volterra_contour::{
    BoundaryConfig, Combined, Quadrant, Region, RunConfig, ScanConfig, boundary, scan, trace,
};
use volterra_core::{Invariant, Level, LotkaVolterra, Point};
use volterra_observers::{IterationLimit, PngPlotter, TraceObserver, ensure_output_dir};
use volterra_solvers::equation::regula_falsi::{self, Status};

const TOL: f64 = regula_falsi::DEFAULT_RESIDUAL_TOL;

fn point(x: f64, y: f64) -> Point {
    Point::new(x, y).expect("valid point")
}

#[test]
fn boundaries_straddle_the_center() {
    let invariant = LotkaVolterra::default();
    let initial = point(20.0, 50.0);
    let level = Level::through(&invariant, initial);
    assert_relative_eq!(
        level.value(),
        invariant.residual(20.0, 50.0, Level::new(0.0)).expect("valid domain")
    );

    let bounds = boundary::estimate(
        &invariant,
        level,
        initial,
        &BoundaryConfig::default(),
        &regula_falsi::Config::default(),
    )
    .expect("bounds exist");

    let [x_min, x_max] = bounds.x.as_array();
    let [y_min, y_max] = bounds.y.as_array();
    assert!(x_min < 50.0 && 50.0 < x_max);
    assert!(y_min < 40.0 && 40.0 < y_max);

    for x in [x_min, x_max] {
        let residual = invariant.residual(x, 40.0, level).expect("valid domain");
        assert!(residual.abs() <= TOL, "residual {residual} at x = {x}");
    }
    for y in [y_min, y_max] {
        let residual = invariant.residual(50.0, y, level).expect("valid domain");
        assert!(residual.abs() <= TOL, "residual {residual} at y = {y}");
    }
}

#[test]
fn upper_right_scan_covers_the_grid() {
    let invariant = LotkaVolterra::default();
    let initial = point(20.0, 50.0);
    let level = Level::through(&invariant, initial);
    let config = BoundaryConfig::default();
    let root = regula_falsi::Config::default();

    let bounds =
        boundary::estimate(&invariant, level, initial, &config, &root).expect("bounds exist");
    let regions = Region::quadrants(&bounds, config.center()).expect("center inside bounds");
    let upper_right = regions[0];
    assert_eq!(upper_right.quadrant, Quadrant::UpperRight);

    let result = scan(
        |x, y| invariant.residual(x, y, level),
        &upper_right,
        &ScanConfig::default(),
        &root,
    );

    let xs = result.xs();
    assert_relative_eq!(xs[0], 50.0);
    assert_relative_eq!(
        xs[xs.len() - 1],
        (bounds.x.hi() * 100.0).floor() / 100.0,
        epsilon = 1e-9
    );
    assert!(xs.windows(2).all(|pair| pair[0] <= pair[1]));
    for point in &result.points {
        assert!(upper_right.solve.contains(point.y()));
        let residual = invariant
            .residual(point.x(), point.y(), level)
            .expect("valid domain");
        assert!(residual.abs() <= TOL);
    }
}

#[test]
fn every_run_contains_its_boundary_crossings() {
    let invariant = LotkaVolterra::default();
    let config = RunConfig::default();

    for (x0, y0) in [(20.0, 50.0), (20.0, 150.0), (200.0, 50.0)] {
        let run = trace(&invariant, point(x0, y0), &config, &mut ()).expect("run succeeds");
        let crossings = run
            .bounds
            .crossings(config.boundary.center())
            .expect("valid crossings");

        for crossing in crossings {
            assert!(run.points.contains(&crossing), "{crossing:?} missing");
        }
        assert_eq!(run.points[..4], crossings);
    }
}

#[test]
fn default_runs_write_the_expected_artifacts() {
    let dir = tempfile::tempdir().expect("temp dir");
    let out = dir.path().join("plots");
    ensure_output_dir(&out).expect("output dir");

    let invariant = LotkaVolterra::default();
    let config = RunConfig {
        scan: ScanConfig::new(0.5, 1).expect("valid scan config"),
        parallel: true,
        ..RunConfig::default()
    };
    let mut plotter = PngPlotter::new(&out).with_size(160, 160);

    let runs: Vec<_> = [(20.0, 50.0), (20.0, 150.0), (200.0, 50.0)]
        .into_iter()
        .map(|(x0, y0)| trace(&invariant, point(x0, y0), &config, &mut plotter).expect("run succeeds"))
        .collect();
    let combined: Combined = runs.iter().collect();
    combined.render(&mut plotter).expect("combined plot renders");

    let mut names: Vec<String> = std::fs::read_dir(&out)
        .expect("readable dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();

    let mut expected = vec!["combined-plot.png".to_owned()];
    for run in ["x20y50", "x20y150", "x200y50"] {
        expected.push(format!("{run}.png"));
        for n in 1..=4 {
            expected.push(format!("{run}-{n}.png"));
        }
    }
    expected.sort();
    assert_eq!(names, expected);
}

#[test]
fn observers_compose_with_the_root_finder() {
    let invariant = LotkaVolterra::default();
    let level = Level::through(&invariant, point(20.0, 50.0));
    let slice = |x: f64| invariant.residual(x, 40.0, level);

    let mut logger = TraceObserver::new("x_min");
    let solution = regula_falsi::solve(slice, [1e-4, 50.0], &regula_falsi::Config::default(), &mut logger)
        .expect("should solve");
    assert_eq!(solution.status, Status::Converged);
    assert_eq!(logger.events(), solution.iters + 2);

    let mut limit = IterationLimit::new(1e-2, 1);
    let early = regula_falsi::solve(slice, [1e-4, 50.0], &regula_falsi::Config::default(), &mut limit)
        .expect("should stop cleanly");
    assert_eq!(early.status, Status::StoppedByObserver);
    assert!(early.iters <= solution.iters);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn invariant_is_linear_in_the_level(
        x in 1e-3..1e3f64,
        y in 1e-3..1e3f64,
        k in -10.0..10.0f64,
    ) {
        let invariant = LotkaVolterra::default();
        let shifted = invariant.residual(x, y, Level::new(k)).unwrap();
        let base = invariant.residual(x, y, Level::new(0.0)).unwrap();
        prop_assert!((shifted - (base - k)).abs() <= 1e-12 * (1.0 + base.abs() + k.abs()));
    }

    #[test]
    fn boundary_roots_meet_tolerance(x0 in 15.0..45.0f64, y0 in 45.0..120.0f64) {
        let invariant = LotkaVolterra::default();
        let initial = Point::new(x0, y0).unwrap();
        let level = Level::through(&invariant, initial);

        let bounds = boundary::estimate(
            &invariant,
            level,
            initial,
            &BoundaryConfig::default(),
            &regula_falsi::Config::default(),
        )
        .unwrap();

        for x in bounds.x.as_array() {
            prop_assert!(invariant.residual(x, 40.0, level).unwrap().abs() <= TOL);
        }
        for y in bounds.y.as_array() {
            prop_assert!(invariant.residual(50.0, y, level).unwrap().abs() <= TOL);
        }
    }
}
