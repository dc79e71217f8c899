use approx::assert_relative_eq;
use ndarray::{Array2, array};
use seawater_rs::{Calculator, GswError, RangeField, column, scalar};

fn approx_in_range(v: f64, min: f64, max: f64) {
    assert!((min..=max).contains(&v), "value {v} not in [{min}, {max}]");
}

#[test]
fn coefficients_at_the_reference_point() {
    let calc = Calculator::new();
    let sa = scalar(33.0);
    let ct = scalar(10.0);
    let p = scalar(100.0);

    let cab = calc.cabbeling(sa.view(), ct.view(), p.view()).unwrap();
    assert_relative_eq!(cab[[0, 0]], 1.111_181_295_081_108e-5, max_relative = 1e-12);

    let tb = calc.thermobaric(sa.view(), ct.view(), p.view()).unwrap();
    assert_relative_eq!(tb[[0, 0]], 2.298_255_413_737_383e-12, max_relative = 1e-12);
}

#[test]
fn fresh_water_is_evaluated_where_it_is() {
    let calc = Calculator::new();
    let sa = array![[0.0, 0.05, 0.1]];
    let ct = array![[10.0, 10.0, 10.0]];
    let cab = calc.cabbeling(sa.view(), ct.view(), scalar(100.0).view()).unwrap();
    for (j, &s) in [0.0, 0.05, 0.1].iter().enumerate() {
        let expected = gsw::volume::cabbeling(s, 10.0, 100.0).unwrap();
        assert_relative_eq!(cab[[0, j]], expected, max_relative = 1e-12);
    }
    assert_ne!(cab[[0, 1]], cab[[0, 2]]);
}

#[test]
fn cabbeling_decreases_with_temperature() {
    // Cabbeling is strongest in cold water.
    let calc = Calculator::new();
    let sa = array![[35.0, 35.0]];
    let ct = array![[0.0, 25.0]];
    let cab = calc.cabbeling(sa.view(), ct.view(), scalar(0.0).view()).unwrap();
    assert!(cab[[0, 0]] > cab[[0, 1]], "{cab:?}");
}

#[test]
fn negative_pressure_below_window_fails() {
    let calc = Calculator::new();
    let sa = scalar(35.0);
    let ct = scalar(10.0);
    let p = array![[-5.0]];
    let err = calc.cabbeling(sa.view(), ct.view(), p.view()).unwrap_err();
    assert_eq!(
        err,
        GswError::Range {
            field: RangeField::Pressure,
            value: -5.0,
            min: -1.5,
            max: 12_000.0,
        }
    );
    let err = calc.thermobaric(sa.view(), ct.view(), p.view()).unwrap_err();
    assert!(matches!(err, GswError::Range { .. }));
}

#[test]
fn sa_and_ct_must_share_a_shape() {
    let calc = Calculator::new();
    let sa = Array2::from_elem((2, 2), 35.0);
    let ct = Array2::from_elem((2, 3), 10.0);
    let err = calc.cabbeling(sa.view(), ct.view(), scalar(0.0).view()).unwrap_err();
    assert!(matches!(
        err,
        GswError::ShapeMismatch {
            argument: "CT",
            found: (2, 3),
            expected: (2, 2),
            ..
        }
    ));
}

#[test]
fn pressure_column_broadcasts_over_square_grid() {
    let calc = Calculator::new();
    let sa = Array2::from_elem((3, 3), 35.0);
    let ct = Array2::from_elem((3, 3), 10.0);
    let p = column(&[0.0, 1000.0, 4000.0]);
    let cab = calc.cabbeling(sa.view(), ct.view(), p.view()).unwrap();
    // Rows share a pressure, so every row is constant.
    for r in cab.rows() {
        assert!(r.iter().all(|&v| v == r[0]));
    }
    assert_ne!(cab[[0, 0]], cab[[2, 0]]);
}

#[test]
fn negative_salinity_clamps_to_fresh_water() {
    let calc = Calculator::new();
    let ct = scalar(10.0);
    let p = scalar(0.0);
    let clamped = calc.cabbeling(scalar(-2.0).view(), ct.view(), p.view()).unwrap();
    let fresh = calc.cabbeling(scalar(0.0).view(), ct.view(), p.view()).unwrap();
    assert_eq!(clamped, fresh);
}

#[test]
fn missing_cells_stay_missing() {
    let calc = Calculator::new();
    let sa = array![[35.0, f64::NAN]];
    let ct = array![[10.0, 10.0]];
    let cab = calc.cabbeling(sa.view(), ct.view(), scalar(99_999.0).view()).unwrap();
    // Fill-coded pressure makes every cell missing.
    assert!(cab.iter().all(|v| v.is_nan()));

    let cab = calc.cabbeling(sa.view(), ct.view(), scalar(0.0).view()).unwrap();
    assert!(cab[[0, 0]].is_finite());
    assert!(cab[[0, 1]].is_nan());
}

#[test]
fn thermobaric_is_positive_at_depth() {
    let calc = Calculator::new();
    let tb = calc
        .evaluate(
            "thermobaric",
            &[scalar(35.0).view(), scalar(10.0).view(), scalar(1000.0).view()],
        )
        .unwrap();
    approx_in_range(tb[[0, 0]], 1.0e-13, 1.0e-10);
}
