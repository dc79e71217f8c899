use log::debug;
use ndarray::{Array2, ArrayView2};

use crate::adapters::{Teos10Kernel, ThermodynamicKernel};
use crate::error::GswError;
use crate::grid::Orientation;
use crate::grid::cells::{map1, map3, map4};
use crate::grid::sanitize::{clamp_negative_salinity, replace_fill_values};
use crate::models::{SALINITY_PRESSURE_FILL, Settings};
use crate::salinity::anomaly::Observation;
use crate::salinity::derivatives::{State, cabbeling_at, thermobaric_at};

/// Evaluates derived seawater properties over 2-D grids.
///
/// Every operation takes a primary grid (SP or SA) plus auxiliary arguments
/// that may be scalars (1×1), row or column vectors, or full grids; they are
/// broadcast onto the primary grid before any validation. Results always
/// have the primary grid's shape and may contain `NaN` for missing cells.
///
/// ```no_run
/// use ndarray::array;
/// use seawater_rs::{Calculator, scalar};
///
/// let calc = Calculator::new();
/// let sa = array![[34.7, 35.0], [35.1, 34.9]];
/// let ct = array![[4.0, 10.0], [12.0, 2.5]];
/// let cab = calc.cabbeling(sa.view(), ct.view(), scalar(0.0).view()).unwrap();
/// assert_eq!(cab.dim(), (2, 2));
/// ```
#[derive(Debug, Clone)]
pub struct Calculator<K = Teos10Kernel> {
    kernel: K,
    settings: Settings,
}

impl Calculator {
    /// TEOS-10 kernel with Standard Seawater composition and default
    /// settings.
    pub fn new() -> Self {
        Self::with_kernel(Teos10Kernel::standard(), Settings::default())
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ThermodynamicKernel> Calculator<K> {
    /// Calculator over a custom kernel.
    ///
    /// # Arguments
    /// * `kernel` - thermodynamic primitives, e.g. a [`Teos10Kernel`] over a
    ///   [`GriddedAtlas`](crate::GriddedAtlas)
    /// * `settings` - evaluation settings; an inverted pressure window is
    ///   swapped
    pub fn with_kernel(kernel: K, settings: Settings) -> Self {
        Self {
            kernel,
            settings: settings.normalized(),
        }
    }

    /// The kernel every cell is evaluated with.
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Settings after normalization.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Absolute Salinity Anomaly, `SA - SR` (g/kg), from Practical Salinity
    /// at sea pressure `p` (dbar) and position `long`, `lat` (degrees).
    ///
    /// The anomaly is only as good as the kernel's SAAR source. With
    /// [`Calculator::new`] that is [`StandardSeawater`](crate::StandardSeawater),
    /// so the result is zero everywhere outside the Baltic Sea; build the
    /// calculator over `Teos10Kernel::new(atlas)` with a
    /// [`GriddedAtlas`](crate::GriddedAtlas) for non-zero anomalies.
    ///
    /// # Returns
    /// * deltaSA with the shape of `sp`, `NaN` where SP is missing or
    ///   implausible
    pub fn delta_sa_from_sp(
        &self,
        sp: ArrayView2<'_, f64>,
        p: ArrayView2<'_, f64>,
        long: ArrayView2<'_, f64>,
        lat: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, GswError> {
        let obs = Observation::prepare(sp, p, long, lat, &self.settings)?;
        debug!("deltaSA_from_SP over {} cells", obs.sp.len());
        let k = &self.kernel;
        let delta = map4(
            &obs.sp,
            &obs.p,
            &obs.long,
            &obs.lat,
            &self.settings,
            |sp, p, long, lat| k.sa_from_sp(sp, p, long, lat) - k.sr_from_sp(sp),
        );
        Ok(obs.orientation.restore(delta))
    }

    /// Absolute Salinity (g/kg) from Practical Salinity, with the same
    /// broadcasting and validation as [`Calculator::delta_sa_from_sp`].
    pub fn sa_from_sp(
        &self,
        sp: ArrayView2<'_, f64>,
        p: ArrayView2<'_, f64>,
        long: ArrayView2<'_, f64>,
        lat: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, GswError> {
        let obs = Observation::prepare(sp, p, long, lat, &self.settings)?;
        debug!("SA_from_SP over {} cells", obs.sp.len());
        let k = &self.kernel;
        let sa = map4(
            &obs.sp,
            &obs.p,
            &obs.long,
            &obs.lat,
            &self.settings,
            |sp, p, long, lat| k.sa_from_sp(sp, p, long, lat),
        );
        Ok(obs.orientation.restore(sa))
    }

    /// Reference Salinity (g/kg) from Practical Salinity. Fill codes become
    /// missing and negative SP is clamped to zero.
    pub fn sr_from_sp(&self, sp: ArrayView2<'_, f64>) -> Result<Array2<f64>, GswError> {
        let orientation = Orientation::for_shape(sp.dim());
        let mut sp = orientation.canonical(sp.to_owned());
        if self.settings.legacy_fill_values {
            replace_fill_values(&mut sp, &SALINITY_PRESSURE_FILL);
        }
        clamp_negative_salinity(&mut sp);

        let k = &self.kernel;
        let sr = map1(&sp, &self.settings, |sp| k.sr_from_sp(sp));
        Ok(orientation.restore(sr))
    }

    /// Cabbeling coefficient with respect to Conservative Temperature
    /// (1/K²). `sa` and `ct` must share a shape; `p` is broadcast onto it.
    ///
    /// States outside the range of the equation of state are not detected
    /// here; their results are as unreliable as the kernel makes them.
    pub fn cabbeling(
        &self,
        sa: ArrayView2<'_, f64>,
        ct: ArrayView2<'_, f64>,
        p: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, GswError> {
        let state = State::prepare(sa, ct, p, &self.settings)?;
        debug!("cabbeling over {} cells", state.sa.len());
        let k = &self.kernel;
        let cab = map3(&state.sa, &state.ct, &state.p, &self.settings, |sa, ct, p| {
            cabbeling_at(k, sa, ct, p)
        });
        Ok(state.orientation.restore(cab))
    }

    /// Thermobaric coefficient with respect to Conservative Temperature
    /// (1/(K Pa)), with the same argument rules as [`Calculator::cabbeling`].
    pub fn thermobaric(
        &self,
        sa: ArrayView2<'_, f64>,
        ct: ArrayView2<'_, f64>,
        p: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, GswError> {
        let state = State::prepare(sa, ct, p, &self.settings)?;
        debug!("thermobaric over {} cells", state.sa.len());
        let k = &self.kernel;
        let tb = map3(&state.sa, &state.ct, &state.p, &self.settings, |sa, ct, p| {
            thermobaric_at(k, sa, ct, p)
        });
        Ok(state.orientation.restore(tb))
    }

    /// Calls a property by name with positional arguments.
    ///
    /// Names are matched case-insensitively: `"deltaSA_from_SP"`,
    /// `"SA_from_SP"`, `"SR_from_SP"`, `"cabbeling"` and `"thermobaric"`.
    /// A wrong argument count fails with [`GswError::Arity`].
    pub fn evaluate(
        &self,
        function: &str,
        args: &[ArrayView2<'_, f64>],
    ) -> Result<Array2<f64>, GswError> {
        let f = function.trim().to_ascii_lowercase();
        match f.as_str() {
            "deltasa_from_sp" => {
                let [sp, p, long, lat] = positional::<4>("deltaSA_from_SP", args)?;
                self.delta_sa_from_sp(sp, p, long, lat)
            }
            "sa_from_sp" => {
                let [sp, p, long, lat] = positional::<4>("SA_from_SP", args)?;
                self.sa_from_sp(sp, p, long, lat)
            }
            "sr_from_sp" => {
                let [sp] = positional::<1>("SR_from_SP", args)?;
                self.sr_from_sp(sp)
            }
            "cabbeling" => {
                let [sa, ct, p] = positional::<3>("cabbeling", args)?;
                self.cabbeling(sa, ct, p)
            }
            "thermobaric" => {
                let [sa, ct, p] = positional::<3>("thermobaric", args)?;
                self.thermobaric(sa, ct, p)
            }
            _ => Err(GswError::UnknownFunction(function.to_string())),
        }
    }
}

fn positional<'a, const N: usize>(
    function: &'static str,
    args: &[ArrayView2<'a, f64>],
) -> Result<[ArrayView2<'a, f64>; N], GswError> {
    <[ArrayView2<'a, f64>; N]>::try_from(args).map_err(|_| GswError::Arity {
        function,
        expected: N,
        found: args.len(),
    })
}
