use gsw as gsw_teos10;

use crate::adapters::atlas::{AnomalyAtlas, StandardSeawater};
use crate::adapters::kernel::{
    SpecvolFirstDerivatives, SpecvolSecondDerivatives, ThermodynamicKernel,
};

const GSW_SSO: f64 = 35.165_04; // Standard Ocean Salinity
const GSW_UPS: f64 = 35.0; // Reference Practical Salinity divisor

/// TEOS-10 kernel backed by the `gsw` crate.
///
/// Density and the partial derivatives of specific volume come from the
/// 75-term polynomial in `gsw::volume`. Any state `gsw` rejects evaluates to
/// `NaN`.
///
/// The composition anomaly used by [`ThermodynamicKernel::sa_from_sp`] is
/// read from `A`; the default, [`StandardSeawater`], makes SA equal SR
/// outside the Baltic Sea.
#[derive(Debug, Clone, Default)]
pub struct Teos10Kernel<A = StandardSeawater> {
    atlas: A,
}

impl Teos10Kernel {
    /// Kernel for Standard Seawater composition.
    pub fn standard() -> Self {
        Self {
            atlas: StandardSeawater,
        }
    }
}

impl<A: AnomalyAtlas> Teos10Kernel<A> {
    /// Kernel that reads the Absolute Salinity Anomaly Ratio from `atlas`.
    ///
    /// # Arguments
    /// * `atlas` - SAAR source, e.g. a [`GriddedAtlas`](crate::GriddedAtlas)
    pub fn new(atlas: A) -> Self {
        Self { atlas }
    }

    /// The SAAR source this kernel was built with.
    pub fn atlas(&self) -> &A {
        &self.atlas
    }
}

impl<A: AnomalyAtlas> ThermodynamicKernel for Teos10Kernel<A> {
    fn sa_from_sp(&self, sp: f64, p: f64, long: f64, lat: f64) -> f64 {
        if let Some(sa) = sa_from_sp_baltic(sp, long, lat) {
            return sa;
        }
        let saar = self.atlas.saar(p, long, lat);
        self.sr_from_sp(sp) * (1.0 + saar)
    }

    fn sr_from_sp(&self, sp: f64) -> f64 {
        gsw_teos10::conversions::sr_from_sp(sp)
    }

    fn rho(&self, sa: f64, ct: f64, p: f64) -> f64 {
        gsw_teos10::volume::rho(sa, ct, p).unwrap_or(f64::NAN)
    }

    fn specvol_first_derivatives(&self, sa: f64, ct: f64, p: f64) -> SpecvolFirstDerivatives {
        let (v_sa, v_ct, v_p) = gsw_teos10::volume::specvol_first_derivatives(sa, ct, p)
            .unwrap_or((f64::NAN, f64::NAN, f64::NAN));
        SpecvolFirstDerivatives { v_sa, v_ct, v_p }
    }

    fn specvol_second_derivatives(&self, sa: f64, ct: f64, p: f64) -> SpecvolSecondDerivatives {
        let (v_sa_sa, v_sa_ct, v_ct_ct, v_sa_p, v_ct_p) =
            gsw_teos10::volume::specvol_second_derivatives(sa, ct, p).unwrap_or((
                f64::NAN,
                f64::NAN,
                f64::NAN,
                f64::NAN,
                f64::NAN,
            ));
        SpecvolSecondDerivatives {
            v_sa_sa,
            v_sa_ct,
            v_ct_ct,
            v_sa_p,
            v_ct_p,
        }
    }

    fn alpha_on_beta(&self, sa: f64, ct: f64, p: f64) -> f64 {
        gsw_teos10::volume::alpha_on_beta(sa, ct, p).unwrap_or(f64::NAN)
    }
}

/// Absolute Salinity in the Baltic Sea, where the composition anomaly comes
/// from river-borne solutes rather than the global atlas. `None` outside the
/// Baltic.
pub fn sa_from_sp_baltic(sp: f64, long: f64, lat: f64) -> Option<f64> {
    const WEST_LAT: [f64; 3] = [50.0, 59.0, 69.0];
    const WEST_LONG: [f64; 3] = [12.6, 7.0, 26.0];
    const EAST_LAT: [f64; 2] = [50.0, 69.0];
    const EAST_LONG: [f64; 2] = [45.0, 26.0];

    if !(long > 7.0 && long < 45.0 && lat > 50.0 && lat < 69.0) {
        return None;
    }
    let west = interp1(&WEST_LAT, &WEST_LONG, lat);
    let east = interp1(&EAST_LAT, &EAST_LONG, lat);
    if west <= long && long <= east {
        Some(((GSW_SSO - 0.087) / GSW_UPS) * sp + 0.087)
    } else {
        None
    }
}

/// Piecewise-linear interpolation of `ys` over strictly increasing `xs`,
/// clamped at both ends.
fn interp1(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }
    let i = xs.partition_point(|&a| a <= x) - 1;
    ys[i] + (x - xs[i]) * (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn baltic_polygon() {
        // Gulf of Finland
        let sa = sa_from_sp_baltic(6.0, 25.0, 60.0).unwrap();
        assert_relative_eq!(sa, (35.078_04 / 35.0) * 6.0 + 0.087, epsilon = 1e-12);
        // North Sea, west of the Danish straits
        assert!(sa_from_sp_baltic(35.0, 3.0, 56.0).is_none());
        // Open Pacific
        assert!(sa_from_sp_baltic(35.0, 188.0, 4.0).is_none());
        assert!(sa_from_sp_baltic(6.0, f64::NAN, 60.0).is_none());
    }

    #[test]
    fn interp1_clamps_and_interpolates() {
        let xs = [50.0, 59.0, 69.0];
        let ys = [12.6, 7.0, 26.0];
        assert_relative_eq!(interp1(&xs, &ys, 60.0), 8.9, epsilon = 1e-12);
        assert_eq!(interp1(&xs, &ys, 40.0), 12.6);
        assert_eq!(interp1(&xs, &ys, 80.0), 26.0);
    }

    #[test]
    fn standard_seawater_sa_equals_sr() {
        let k = Teos10Kernel::standard();
        assert_relative_eq!(
            k.sa_from_sp(35.0, 0.0, 188.0, 4.0),
            35.165_04,
            epsilon = 1e-9
        );
    }

    #[test]
    fn density_is_plausible() {
        let k = Teos10Kernel::standard();
        let rho = k.rho(35.0, 10.0, 0.0);
        assert!((1020.0..1035.0).contains(&rho), "rho {rho}");
    }

    #[test]
    fn first_derivatives_match_reference_values() {
        let k = Teos10Kernel::standard();
        let d1 = k.specvol_first_derivatives(32.0, 10.0, 100.0);
        assert_relative_eq!(d1.v_sa, -7.355_503_539_675_526e-7, max_relative = 1e-12);
        assert_relative_eq!(d1.v_ct, 1.571_564_328_318_736_4e-7, max_relative = 1e-12);
        assert_relative_eq!(d1.v_p, -4.302_161_866_442_108_5e-13, max_relative = 1e-12);

        let aob = k.alpha_on_beta(35.0, 10.0, 0.0);
        assert!((0.1..0.4).contains(&aob), "alpha/beta {aob}");
    }

    #[test]
    fn second_derivatives_are_exact() {
        let k = Teos10Kernel::standard();
        let d2 = k.specvol_second_derivatives(33.0, 10.0, 100.0);
        let (v_sa_sa, v_sa_ct, v_ct_ct, v_sa_p, v_ct_p) =
            gsw::volume::specvol_second_derivatives(33.0, 10.0, 100.0).unwrap();
        assert_eq!(d2.v_sa_sa, v_sa_sa);
        assert_eq!(d2.v_sa_ct, v_sa_ct);
        assert_eq!(d2.v_ct_ct, v_ct_ct);
        assert_eq!(d2.v_sa_p, v_sa_p);
        assert_eq!(d2.v_ct_p, v_ct_p);
    }

    #[test]
    fn rejected_state_is_missing() {
        let k = Teos10Kernel::standard();
        assert!(k.rho(-0.1, 10.0, 100.0).is_nan());
        assert!(k.specvol_first_derivatives(-0.1, 10.0, 100.0).v_sa.is_nan());
        assert!(k.specvol_second_derivatives(-0.1, 10.0, 100.0).v_ct_p.is_nan());
        assert!(k.alpha_on_beta(-0.1, 10.0, 100.0).is_nan());
    }

    #[test]
    fn missing_state_propagates() {
        let k = Teos10Kernel::standard();
        assert!(k.rho(f64::NAN, 10.0, 0.0).is_nan());
        assert!(k.alpha_on_beta(35.0, f64::NAN, 0.0).is_nan());
    }
}
