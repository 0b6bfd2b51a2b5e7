//! The dynamics parameter group.

use crate::error::ParamError;

/// The three scalars governing the spin dynamics.
///
/// Energies are already reduced by the inverse temperature, so there is
/// no separate temperature parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Params {
    /// Coupling strength times inverse temperature (dimensionless).
    pub beta_j: f64,
    /// External field times inverse temperature (dimensionless).
    pub beta_mu_b: f64,
    /// Attempted-flip rate per site, in inverse model-time units.
    pub freq: f64,
}

impl Default for Params {
    /// Free spins, no field, unit rate.
    fn default() -> Self {
        Self {
            beta_j: 0.0,
            beta_mu_b: 0.0,
            freq: 1.0,
        }
    }
}

impl Params {
    /// Build a validated parameter group.
    ///
    /// # Errors
    ///
    /// [`ParamError::NonFinite`] naming the first NaN or infinite value,
    /// checked in argument order.
    ///
    /// # Examples
    ///
    /// ```
    /// use kising_core::Params;
    ///
    /// let p = Params::new(0.5, 0.0, 1.0).unwrap();
    /// assert_eq!(p.beta_j, 0.5);
    /// assert!(Params::new(f64::NAN, 0.0, 1.0).is_err());
    /// ```
    pub fn new(beta_j: f64, beta_mu_b: f64, freq: f64) -> Result<Self, ParamError> {
        let p = Self {
            beta_j,
            beta_mu_b,
            freq,
        };
        p.validate()?;
        Ok(p)
    }

    /// Check that every value is finite.
    pub fn validate(&self) -> Result<(), ParamError> {
        check_finite("betaJ", self.beta_j)?;
        check_finite("betaMuB", self.beta_mu_b)?;
        check_finite("freq", self.freq)?;
        Ok(())
    }

    /// Reduced energy change of flipping a spin with signed value `s`
    /// whose four neighbours sum to `neighbour_sum`:
    /// `dE = 2 s (betaJ n + betaMuB)`.
    #[inline]
    pub fn flip_energy(&self, s: i8, neighbour_sum: i8) -> f64 {
        2.0 * f64::from(s) * (self.beta_j * f64::from(neighbour_sum) + self.beta_mu_b)
    }

    /// Attempted-flip rate for a whole lattice of `cells` sites.
    #[inline]
    pub fn lattice_rate(&self, cells: usize) -> f64 {
        self.freq * cells as f64
    }
}

/// Reject NaN and infinities under the given parameter name.
pub fn check_finite(name: &'static str, value: f64) -> Result<(), ParamError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParamError::NonFinite { name, value })
    }
}
