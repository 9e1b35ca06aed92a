//! Prediction scoring.

use skyguess_weather::WeatherObservation;

use crate::types::PredictionGuess;

/// Accuracy lost per degree of temperature error
pub const TEMPERATURE_PENALTY_PER_DEGREE: f64 = 5.0;
/// Minimum accuracy for a prediction to count as correct
pub const CORRECT_THRESHOLD: f64 = 80.0;
/// Minimum accuracy that advances Weather Master
pub const MASTER_THRESHOLD: f64 = 90.0;
/// Largest temperature error that advances Temperature Expert
pub const TEMPERATURE_EXPERT_DELTA: f64 = 2.0;

/// Component and overall accuracies for one resolved prediction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub temperature: f64,
    pub condition: f64,
    pub precipitation: f64,
    /// Mean of the three components, unrounded
    pub overall: f64,
    pub points: u32,
    pub temperature_delta: f64,
    pub condition_matched: bool,
}

impl Score {
    pub fn is_correct(&self) -> bool {
        self.overall >= CORRECT_THRESHOLD
    }

    pub fn is_master(&self) -> bool {
        self.overall >= MASTER_THRESHOLD
    }

    pub fn is_temperature_expert(&self) -> bool {
        self.temperature_delta <= TEMPERATURE_EXPERT_DELTA
    }
}

/// Reduce an observation to the triple a guess is compared against
pub fn actual_from_observation(observation: &WeatherObservation) -> PredictionGuess {
    PredictionGuess {
        temperature: observation.temp,
        condition: observation.primary_condition().to_string(),
        precipitation: observation.has_precipitation(),
    }
}

pub fn score(guess: &PredictionGuess, actual: &PredictionGuess) -> Score {
    let temperature_delta = (guess.temperature - actual.temperature).abs();
    let temperature = (100.0 - temperature_delta * TEMPERATURE_PENALTY_PER_DEGREE).max(0.0);

    let condition_matched = guess.condition == actual.condition;
    let condition = if condition_matched { 100.0 } else { 0.0 };
    let precipitation = if guess.precipitation == actual.precipitation {
        100.0
    } else {
        0.0
    };

    let overall = (temperature + condition + precipitation) / 3.0;

    Score {
        temperature,
        condition,
        precipitation,
        overall,
        points: overall.round() as u32,
        temperature_delta,
        condition_matched,
    }
}
