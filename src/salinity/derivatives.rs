//! Properties synthesised from partial derivatives of specific volume.
//!
//! Both coefficients are expressed through the density derivatives
//!
//! ```text
//! alpha_CT = rho (v_CT_CT - rho v_CT^2)
//! alpha_SA = rho (v_SA_CT - rho v_SA v_CT)
//! beta_SA  = -rho (v_SA_SA - rho v_SA^2)
//! ```
//!
//! so that they share the kernel's specific-volume derivative evaluators.

use ndarray::{Array2, ArrayView2};

use crate::adapters::ThermodynamicKernel;
use crate::error::{GswError, RangeField};
use crate::grid::sanitize::{check_range, clamp_negative_salinity, replace_fill_values};
use crate::grid::{Orientation, reconcile, require_same_shape};
use crate::models::{SALINITY_PRESSURE_FILL, Settings};

/// `(SA, CT, p)` reconciled onto SA's grid, in canonical orientation.
#[derive(Debug, Clone)]
pub struct State {
    pub sa: Array2<f64>,
    pub ct: Array2<f64>,
    pub p: Array2<f64>,
    pub orientation: Orientation,
}

impl State {
    /// CT must match SA exactly; `p` is broadcast onto SA. Negative SA is
    /// clamped to zero, pressure fill codes become missing and any pressure
    /// outside the accepted window fails the call.
    pub fn prepare(
        sa: ArrayView2<'_, f64>,
        ct: ArrayView2<'_, f64>,
        p: ArrayView2<'_, f64>,
        settings: &Settings,
    ) -> Result<Self, GswError> {
        let target = sa.dim();
        require_same_shape("CT", ct, "SA", target)?;
        let p = reconcile("p", p, "SA", target, false)?;

        let orientation = Orientation::for_shape(target);
        let mut sa = orientation.canonical(sa.to_owned());
        let ct = orientation.canonical(ct.to_owned());
        let mut p = orientation.canonical(p);

        if settings.legacy_fill_values {
            replace_fill_values(&mut p, &SALINITY_PRESSURE_FILL);
        }
        check_range(
            RangeField::Pressure,
            &p,
            settings.pressure_min,
            settings.pressure_max,
        )?;
        clamp_negative_salinity(&mut sa);

        Ok(Self {
            sa,
            ct,
            p,
            orientation,
        })
    }
}

/// Cabbeling coefficient with respect to Conservative Temperature (1/K²)
/// at a single state.
pub fn cabbeling_at<K: ThermodynamicKernel + ?Sized>(
    kernel: &K,
    sa: f64,
    ct: f64,
    p: f64,
) -> f64 {
    let d1 = kernel.specvol_first_derivatives(sa, ct, p);
    let d2 = kernel.specvol_second_derivatives(sa, ct, p);
    let rho = kernel.rho(sa, ct, p);

    let alpha_ct = rho * (d2.v_ct_ct - rho * d1.v_ct * d1.v_ct);
    let alpha_sa = rho * (d2.v_sa_ct - rho * d1.v_sa * d1.v_ct);
    let beta_sa = -rho * (d2.v_sa_sa - rho * d1.v_sa * d1.v_sa);

    let alpha_on_beta = kernel.alpha_on_beta(sa, ct, p);

    alpha_ct + alpha_on_beta * (2.0 * alpha_sa - alpha_on_beta * beta_sa)
}

/// Thermobaric coefficient with respect to Conservative Temperature
/// (1/(K Pa)) at a single state.
pub fn thermobaric_at<K: ThermodynamicKernel + ?Sized>(
    kernel: &K,
    sa: f64,
    ct: f64,
    p: f64,
) -> f64 {
    let d1 = kernel.specvol_first_derivatives(sa, ct, p);
    let d2 = kernel.specvol_second_derivatives(sa, ct, p);
    let rho = kernel.rho(sa, ct, p);

    rho * (d2.v_ct_p - (d1.v_ct / d1.v_sa) * d2.v_sa_p)
}
