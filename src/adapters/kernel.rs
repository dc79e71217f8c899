/// Ratio of Reference Salinity to Practical Salinity, 35.16504 / 35.
pub const SR_FACTOR: f64 = 35.165_04 / 35.0;

/// First partial derivatives of specific volume.
///
/// Units: `v_sa` in (m³/kg)(g/kg)⁻¹, `v_ct` in (m³/kg)K⁻¹, `v_p` in (m³/kg)Pa⁻¹.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecvolFirstDerivatives {
    pub v_sa: f64,
    pub v_ct: f64,
    pub v_p: f64,
}

/// Second partial derivatives of specific volume. Pressure derivatives are
/// per Pa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecvolSecondDerivatives {
    pub v_sa_sa: f64,
    pub v_sa_ct: f64,
    pub v_ct_ct: f64,
    pub v_sa_p: f64,
    pub v_ct_p: f64,
}

/// Cell-wise thermodynamic primitives.
///
/// Every method is pure and evaluated at a single `(SA, CT, p)` triple (or
/// `(SP, p, long, lat)` for the salinity conversions). A `NaN` argument must
/// yield `NaN` results. Implementations are shared across worker threads.
pub trait ThermodynamicKernel: Sync {
    /// Absolute Salinity (g/kg) from Practical Salinity at a position.
    fn sa_from_sp(&self, sp: f64, p: f64, long: f64, lat: f64) -> f64;

    /// Reference Salinity (g/kg) from Practical Salinity.
    fn sr_from_sp(&self, sp: f64) -> f64 {
        sp * SR_FACTOR
    }

    /// In-situ density (kg/m³).
    fn rho(&self, sa: f64, ct: f64, p: f64) -> f64;

    fn specvol_first_derivatives(&self, sa: f64, ct: f64, p: f64) -> SpecvolFirstDerivatives;

    fn specvol_second_derivatives(&self, sa: f64, ct: f64, p: f64) -> SpecvolSecondDerivatives;

    /// Thermal expansion coefficient over haline contraction coefficient,
    /// (g/kg)K⁻¹.
    fn alpha_on_beta(&self, sa: f64, ct: f64, p: f64) -> f64;
}
