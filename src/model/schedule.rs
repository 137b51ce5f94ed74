//! Piecewise-constant alpha schedule and the energy it saves over time.

use std::fmt;

use crate::error::{PaybackError, Result};
use crate::units::YEAR_TO_SEC;

use super::types::{ModelParams, Usage};

/// Declared duration marking a phase that runs until the time horizon.
pub const UNTIL_HORIZON: f64 = -1.0;

/// How long a phase lasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseLength {
    Years(f64),
    /// Runs to the time horizon; only valid for the last phase.
    UntilHorizon,
}

/// One step of the schedule: alpha is `alpha0 * multiplier` while it lasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    pub multiplier: f64,
    pub length: PhaseLength,
}

/// Ordered phases describing how the behavioural effect changes over time.
///
/// Phase `i` spans `[start_i, end_i)` where `start_0 = 0`, each start is the
/// sum of the earlier durations, and the last phase always ends at the time
/// horizon.
///
/// # Examples
///
/// ```
/// use smart_payback::model::schedule::AlphaSchedule;
///
/// // full effect for six months, none afterwards
/// let schedule = AlphaSchedule::from_pairs(&[[1.0, 0.5], [0.0, -1.0]], 50.0).unwrap();
/// assert_eq!(schedule.alpha_at(0.25, 0.08, 50.0), 0.08);
/// assert_eq!(schedule.alpha_at(2.0, 0.08, 50.0), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaSchedule {
    phases: Vec<Phase>,
}

impl AlphaSchedule {
    /// Builds a schedule, rejecting shapes that cannot be evaluated within
    /// `time_horizon_years`.
    ///
    /// # Errors
    ///
    /// Returns [`PaybackError::InvalidSchedule`] if there are no phases, a
    /// multiplier is negative or not finite, a non-terminal phase runs until
    /// the horizon, a duration is not a positive finite number, or the
    /// declared durations add up to more than the horizon.
    pub fn new(phases: Vec<Phase>, time_horizon_years: f64) -> Result<Self> {
        if phases.is_empty() {
            return Err(PaybackError::InvalidSchedule("no phases".into()));
        }
        let last = phases.len() - 1;
        let mut declared = 0.0;
        for (i, phase) in phases.iter().enumerate() {
            if !phase.multiplier.is_finite() || phase.multiplier < 0.0 {
                return Err(PaybackError::InvalidSchedule(format!(
                    "phase {i}: multiplier must be finite and >= 0, got {}",
                    phase.multiplier
                )));
            }
            match phase.length {
                PhaseLength::UntilHorizon if i != last => {
                    return Err(PaybackError::InvalidSchedule(format!(
                        "phase {i}: only the last phase may extend to the horizon"
                    )));
                }
                PhaseLength::Years(years) if !years.is_finite() || years <= 0.0 => {
                    return Err(PaybackError::InvalidSchedule(format!(
                        "phase {i}: duration must be > 0 years, got {years}"
                    )));
                }
                PhaseLength::Years(years) => declared += years,
                PhaseLength::UntilHorizon => {}
            }
        }
        if declared > time_horizon_years {
            return Err(PaybackError::InvalidSchedule(format!(
                "phase durations sum to {declared} years, beyond the {time_horizon_years}-year horizon"
            )));
        }
        Ok(Self { phases })
    }

    /// Parses `[multiplier, years]` pairs where `years == -1` means "until the horizon".
    ///
    /// # Errors
    ///
    /// Same as [`AlphaSchedule::new`].
    pub fn from_pairs(pairs: &[[f64; 2]], time_horizon_years: f64) -> Result<Self> {
        let phases = pairs
            .iter()
            .map(|&[multiplier, years]| Phase {
                multiplier,
                length: if years == UNTIL_HORIZON {
                    PhaseLength::UntilHorizon
                } else {
                    PhaseLength::Years(years)
                },
            })
            .collect();
        Self::new(phases, time_horizon_years)
    }

    /// Full effect for the whole horizon, `[[1, -1]]`.
    pub fn constant() -> Self {
        Self {
            phases: vec![Phase {
                multiplier: 1.0,
                length: PhaseLength::UntilHorizon,
            }],
        }
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Pairs in the `[multiplier, years]` notation.
    pub fn to_pairs(&self) -> Vec<[f64; 2]> {
        self.phases
            .iter()
            .map(|p| match p.length {
                PhaseLength::Years(y) => [p.multiplier, y],
                PhaseLength::UntilHorizon => [p.multiplier, UNTIL_HORIZON],
            })
            .collect()
    }

    /// Phase boundaries `[0, end_0, end_1, ..., horizon]` (years), never past the horizon.
    pub fn boundaries(&self, time_horizon_years: f64) -> Vec<f64> {
        let mut bounds = Vec::with_capacity(self.phases.len() + 1);
        bounds.push(0.0);
        let mut acc = 0.0;
        for phase in &self.phases[..self.phases.len() - 1] {
            if let PhaseLength::Years(y) = phase.length {
                acc += y;
            }
            bounds.push(acc.min(time_horizon_years));
        }
        bounds.push(time_horizon_years);
        bounds
    }

    /// Alpha-weighted time elapsed by `t_years`: `sum(weight_i * multiplier_i)`.
    ///
    /// A phase weighs its full width once `t` is past its end, the elapsed
    /// part while `t` is inside it, and nothing before it starts.
    fn weighted_years(&self, t_years: f64, bounds: &[f64]) -> f64 {
        self.phases
            .iter()
            .zip(bounds.windows(2))
            .map(|(phase, w)| {
                let width = (w[1] - w[0]).max(0.0);
                (t_years - w[0]).clamp(0.0, width) * phase.multiplier
            })
            .sum()
    }

    /// Primary energy saved by the overlay up to `t_years` (J).
    pub fn energy_saved(&self, t_years: f64, usage: &Usage, params: &ModelParams) -> f64 {
        let bounds = self.boundaries(params.time_horizon_years);
        Self::saved_scale(usage, params) * self.weighted_years(t_years, &bounds)
    }

    /// [`AlphaSchedule::energy_saved`] over a sequence of times.
    pub fn energy_saved_series(
        &self,
        times_years: &[f64],
        usage: &Usage,
        params: &ModelParams,
    ) -> Vec<f64> {
        let bounds = self.boundaries(params.time_horizon_years);
        let scale = Self::saved_scale(usage, params);
        times_years
            .iter()
            .map(|&t| scale * self.weighted_years(t, &bounds))
            .collect()
    }

    fn saved_scale(usage: &Usage, params: &ModelParams) -> f64 {
        params.elec_to_primary * YEAR_TO_SEC * usage.beta * usage.baseline_power_w * usage.alpha0
    }

    /// Index of the phase containing `t_years`.
    ///
    /// Boundaries belong to the later phase; times before zero fall in the
    /// first phase and times past the horizon in the last.
    pub fn phase_index(&self, t_years: f64, time_horizon_years: f64) -> usize {
        let bounds = self.boundaries(time_horizon_years);
        let last = self.phases.len() - 1;
        (0..last).find(|&i| t_years < bounds[i + 1]).unwrap_or(last)
    }

    /// Instantaneous alpha at `t_years`.
    pub fn alpha_at(&self, t_years: f64, alpha0: f64, time_horizon_years: f64) -> f64 {
        alpha0 * self.phases[self.phase_index(t_years, time_horizon_years)].multiplier
    }

    /// [`AlphaSchedule::alpha_at`] over a sequence of times.
    pub fn alpha_series(&self, times_years: &[f64], alpha0: f64, time_horizon_years: f64) -> Vec<f64> {
        times_years
            .iter()
            .map(|&t| self.alpha_at(t, alpha0, time_horizon_years))
            .collect()
    }
}

impl fmt::Display for AlphaSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .to_pairs()
            .iter()
            .map(|[m, y]| format!("[{m}, {y}]"))
            .collect();
        write!(f, "[{}]", pairs.join(", "))
    }
}
