use ndarray::{Array2, ArrayView2};

use crate::error::{GswError, RangeField};
use crate::grid::sanitize::{
    check_position, check_range, clamp_negative_salinity, flag_implausible_salinity,
    replace_fill_values, wrap_longitude,
};
use crate::grid::{Orientation, reconcile};
use crate::models::{POSITION_FILL, SALINITY_PRESSURE_FILL, Settings};

/// Practical Salinity observations with their pressure and position,
/// reconciled onto SP's grid, in canonical orientation and sanitized.
#[derive(Debug, Clone)]
pub struct Observation {
    pub sp: Array2<f64>,
    pub p: Array2<f64>,
    pub long: Array2<f64>,
    pub lat: Array2<f64>,
    pub orientation: Orientation,
}

impl Observation {
    /// Broadcasts `p`, `long` and `lat` onto `sp`, then validates.
    ///
    /// Fill codes, and SP values that cannot occur at their pressure, become
    /// missing; negative SP is clamped to zero. Any pressure, longitude or
    /// latitude outside its domain fails the whole call.
    pub fn prepare(
        sp: ArrayView2<'_, f64>,
        p: ArrayView2<'_, f64>,
        long: ArrayView2<'_, f64>,
        lat: ArrayView2<'_, f64>,
        settings: &Settings,
    ) -> Result<Self, GswError> {
        let target = sp.dim();
        let p = reconcile("p", p, "SP", target, false)?;
        let lat = reconcile("lat", lat, "SP", target, false)?;
        let long = reconcile("long", long, "SP", target, true)?;

        let orientation = Orientation::for_shape(target);
        let mut sp = orientation.canonical(sp.to_owned());
        let mut p = orientation.canonical(p);
        let mut long = orientation.canonical(long);
        let mut lat = orientation.canonical(lat);

        if settings.legacy_fill_values {
            replace_fill_values(&mut sp, &SALINITY_PRESSURE_FILL);
            replace_fill_values(&mut p, &SALINITY_PRESSURE_FILL);
            replace_fill_values(&mut long, &POSITION_FILL);
            replace_fill_values(&mut lat, &POSITION_FILL);
        }
        wrap_longitude(&mut long);

        check_range(
            RangeField::Pressure,
            &p,
            settings.pressure_min,
            settings.pressure_max,
        )?;
        check_position(&long, &lat)?;

        flag_implausible_salinity(&mut sp, &p);
        clamp_negative_salinity(&mut sp);

        Ok(Self {
            sp,
            p,
            long,
            lat,
            orientation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn prepare(
        sp: Array2<f64>,
        p: Array2<f64>,
        long: Array2<f64>,
        lat: Array2<f64>,
    ) -> Result<Observation, GswError> {
        Observation::prepare(
            sp.view(),
            p.view(),
            long.view(),
            lat.view(),
            &Settings::default(),
        )
    }

    #[test]
    fn caller_arrays_are_untouched() {
        let sp = array![[-5.0, 99_999.0], [35.0, 130.0]];
        let long = array![[-10.0]];
        let obs = prepare(sp.clone(), array![[0.0]], long.clone(), array![[4.0]]).unwrap();
        assert_eq!(sp[[0, 0]], -5.0);
        assert_eq!(long[[0, 0]], -10.0);
        assert_eq!(obs.sp[[0, 0]], 0.0);
        assert!(obs.sp[[0, 1]].is_nan());
        assert!(obs.sp[[1, 1]].is_nan());
        assert_eq!(obs.long[[1, 0]], 350.0);
    }

    #[test]
    fn single_row_is_canonicalized() {
        let obs = prepare(
            array![[35.0, 34.0, 33.0]],
            array![[0.0, 10.0, 20.0]],
            array![[188.0]],
            array![[4.0]],
        )
        .unwrap();
        assert!(obs.orientation.is_transposed());
        assert_eq!(obs.sp.dim(), (3, 1));
        assert_eq!(obs.p[[2, 0]], 20.0);
    }

    fn single(sp: f64, p: f64, long: f64, lat: f64) -> Result<Observation, GswError> {
        prepare(array![[sp]], array![[p]], array![[long]], array![[lat]])
    }

    fn failed_field(result: Result<Observation, GswError>) -> Option<RangeField> {
        match result {
            Err(GswError::Range { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn filled_pressure_is_missing_not_out_of_range() {
        let obs = single(35.0, -99_999.0, 0.0, 0.0).unwrap();
        assert!(obs.p[[0, 0]].is_nan());
    }

    #[test]
    fn domain_violations_abort() {
        assert_eq!(failed_field(single(35.0, -5.0, 0.0, 0.0)), Some(RangeField::Pressure));
        assert_eq!(failed_field(single(35.0, 12_001.0, 0.0, 0.0)), Some(RangeField::Pressure));
        assert_eq!(failed_field(single(35.0, 0.0, -400.0, 0.0)), Some(RangeField::Longitude));
        assert_eq!(failed_field(single(35.0, 0.0, 361.0, 0.0)), Some(RangeField::Longitude));
        assert_eq!(failed_field(single(35.0, 0.0, 0.0, 95.0)), Some(RangeField::Latitude));
        assert!(single(35.0, -1.5, 360.0, -90.0).is_ok());
    }

    #[test]
    fn legacy_fill_can_be_disabled() {
        let settings = Settings {
            legacy_fill_values: false,
            ..Default::default()
        };
        let sp = array![[99_999.0]];
        let p = array![[0.0]];
        let ll = array![[0.0]];
        let obs =
            Observation::prepare(sp.view(), p.view(), ll.view(), ll.view(), &settings).unwrap();
        // Not a fill code any more, but still implausible at the surface.
        assert!(obs.sp[[0, 0]].is_nan());

        let lat = array![[9_999.0]];
        let result = Observation::prepare(p.view(), p.view(), ll.view(), lat.view(), &settings);
        assert_eq!(failed_field(result), Some(RangeField::Latitude));
    }
}
