use rand::Rng;

use crate::error::SimError;

/// Boltzmann constant in eV/K. Fixes the unit system; coupling J is 1.
pub const BOLTZMANN_EV_PER_K: f64 = 8.6173324e-5;

/// Offset between the Celsius and Kelvin scales.
pub const CELSIUS_OFFSET: f64 = 273.15;

/// Convert a Celsius temperature to Kelvin, rejecting non-finite values and
/// anything below absolute zero.
pub fn celsius_to_kelvin(celsius: f64) -> Result<f64, SimError> {
    let kelvin = celsius + CELSIUS_OFFSET;
    if !kelvin.is_finite() {
        return Err(SimError::invalid(format!(
            "temperature must be finite, got {celsius} °C"
        )));
    }
    if kelvin < 0.0 {
        return Err(SimError::invalid(format!(
            "temperature {celsius} °C is below absolute zero"
        )));
    }
    Ok(kelvin)
}

/// Metropolis acceptance rule at a fixed temperature.
///
/// With unit coupling on the square lattice the only positive energy changes
/// are 4 and 8, so both Boltzmann factors are computed once up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Acceptance {
    kelvin: f64,
    /// `[exp(-4 / kT), exp(-8 / kT)]`.
    factors: [f64; 2],
}

impl Acceptance {
    pub fn from_celsius(celsius: f64) -> Result<Self, SimError> {
        Self::from_kelvin(celsius_to_kelvin(celsius)?)
    }

    pub fn from_kelvin(kelvin: f64) -> Result<Self, SimError> {
        if !kelvin.is_finite() || kelvin < 0.0 {
            return Err(SimError::invalid(format!(
                "temperature must be a finite, non-negative Kelvin value, got {kelvin}"
            )));
        }
        Ok(Self {
            kelvin,
            factors: [boltzmann(4, kelvin), boltzmann(8, kelvin)],
        })
    }

    pub fn kelvin(&self) -> f64 {
        self.kelvin
    }

    /// Probability of accepting a flip with energy change `delta`.
    #[inline]
    pub fn probability(&self, delta: i32) -> f64 {
        match delta {
            d if d <= 0 => 1.0,
            4 => self.factors[0],
            8 => self.factors[1],
            d => boltzmann(d, self.kelvin),
        }
    }

    /// Metropolis test. A uniform is drawn only when `delta > 0`.
    #[inline]
    pub fn accepts<R: Rng>(&self, delta: i32, rng: &mut R) -> bool {
        delta <= 0 || rng.gen::<f64>() < self.probability(delta)
    }
}

#[inline]
fn boltzmann(delta: i32, kelvin: f64) -> f64 {
    (-(delta as f64) / (BOLTZMANN_EV_PER_K * kelvin)).exp()
}
