//! Bayesian Knowledge Tracing update.
//!
//! Pure arithmetic over the four model probabilities: given the learner's
//! prior mastery P(Lₙ₋₁) and whether the latest response was correct, produce
//! the posterior P(Lₙ). No I/O, no state; safe to call from any thread.

use serde::{Deserialize, Serialize};

/// Below this the conditional-probability denominator is considered zero and
/// the update refuses to produce NaN/Inf.
const DENOMINATOR_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BktError {
    #[error("probability {name}={value} outside [0, 1]")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("degenerate denominator for prior={prior}, slip={slip}, guess={guess}")]
    DegenerateDenominator { prior: f64, slip: f64, guess: f64 },
}

/// Slip, guess, and transit probabilities of the skill being traced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BktParams {
    pub p_slip: f64,
    pub p_guess: f64,
    pub p_transit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BktUpdate {
    /// P(observe correct) under the prior, independent of the actual response.
    pub p_correct: f64,
    /// P(skill was already known), conditioned on the observed response.
    pub p_known_prior: f64,
    /// Posterior mastery P(Lₙ) after the transit step.
    pub p_ln: f64,
}

fn check_probability(name: &'static str, value: f64) -> Result<(), BktError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(BktError::ProbabilityOutOfRange { name, value })
    }
}

/// One BKT observation step.
///
/// `actual` is whether the learner answered correctly; `prior_l` is the
/// mastery estimate going in. Boundary parameter values (`p_slip` = 1 with
/// `prior_l` = 0, `p_guess` = 1 with `prior_l` = 1) zero a denominator and
/// surface as [`BktError::DegenerateDenominator`] instead of propagating
/// non-finite numbers.
pub fn advance(actual: bool, prior_l: f64, params: &BktParams) -> Result<BktUpdate, BktError> {
    check_probability("priorL", prior_l)?;
    check_probability("pSlip", params.p_slip)?;
    check_probability("pGuess", params.p_guess)?;
    check_probability("pTransit", params.p_transit)?;

    let slip = params.p_slip;
    let guess = params.p_guess;

    let p_correct = prior_l * (1.0 - slip) + (1.0 - prior_l) * guess;
    let (numerator, denominator) = if actual {
        (prior_l * (1.0 - slip), p_correct)
    } else {
        (prior_l * slip, prior_l * slip + (1.0 - prior_l) * (1.0 - guess))
    };

    if denominator.abs() < DENOMINATOR_EPSILON {
        return Err(BktError::DegenerateDenominator {
            prior: prior_l,
            slip,
            guess,
        });
    }

    let p_known_prior = numerator / denominator;
    let p_ln = p_known_prior + (1.0 - p_known_prior) * params.p_transit;

    Ok(BktUpdate {
        p_correct,
        p_known_prior,
        p_ln,
    })
}
