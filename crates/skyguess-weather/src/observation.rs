//! Resolved weather observations used to score predictions.

use serde::{Deserialize, Serialize};

use crate::types::CurrentWeather;

/// Label reported when an observation carries no condition entries
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// One condition entry of an observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationCondition {
    /// Primary condition label ("Clear", "Rain", "Snow", ...)
    pub main: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ObservationCondition {
    pub fn new(main: impl Into<String>) -> Self {
        Self {
            main: main.into(),
            description: None,
        }
    }
}

/// Actual weather at a location, as reported by the fetch layer.
///
/// Field names follow the provider payload: `{"temp": 22.0, "weather": [{"main": "Clear"}]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temp: f64,
    #[serde(default)]
    pub weather: Vec<ObservationCondition>,
}

impl WeatherObservation {
    pub fn new(temp: f64, main: impl Into<String>) -> Self {
        Self {
            temp,
            weather: vec![ObservationCondition::new(main)],
        }
    }

    /// Label of the first condition entry
    pub fn primary_condition(&self) -> &str {
        self.weather
            .first()
            .map(|c| c.main.as_str())
            .unwrap_or(UNKNOWN_CONDITION)
    }

    /// True when the primary condition is Rain or Snow
    pub fn has_precipitation(&self) -> bool {
        matches!(self.primary_condition(), "Rain" | "Snow")
    }
}

impl From<&CurrentWeather> for WeatherObservation {
    fn from(current: &CurrentWeather) -> Self {
        Self {
            temp: current.temperature,
            weather: vec![ObservationCondition {
                main: current.condition.main_label().to_string(),
                description: Some(current.condition.description().to_string()),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::types::WeatherCondition;
    use chrono::Utc;

    #[test]
    fn test_deserialize_provider_payload() {
        let obs: WeatherObservation =
            serde_json::from_str(r#"{"temp": 22.0, "weather": [{"main": "Clear"}]}"#).unwrap();
        assert_eq!(obs.temp, 22.0);
        assert_eq!(obs.primary_condition(), "Clear");
        assert!(!obs.has_precipitation());
    }

    #[test]
    fn test_snow_counts_as_precipitation() {
        assert!(WeatherObservation::new(-2.0, "Snow").has_precipitation());
        assert!(WeatherObservation::new(12.0, "Rain").has_precipitation());
        assert!(!WeatherObservation::new(12.0, "Drizzle").has_precipitation());
    }

    #[test]
    fn test_empty_weather_list_is_unknown() {
        let obs: WeatherObservation = serde_json::from_str(r#"{"temp": 5.5}"#).unwrap();
        assert_eq!(obs.primary_condition(), UNKNOWN_CONDITION);
        assert!(!obs.has_precipitation());
    }

    #[test]
    fn test_only_first_entry_is_primary() {
        let obs = WeatherObservation {
            temp: 8.0,
            weather: vec![ObservationCondition::new("Clouds"), ObservationCondition::new("Rain")],
        };
        assert_eq!(obs.primary_condition(), "Clouds");
        assert!(!obs.has_precipitation());
    }

    #[test]
    fn test_from_current_weather() {
        let current = CurrentWeather {
            temperature: 3.4,
            feels_like: 1.0,
            humidity: 90,
            wind_speed: 12.0,
            condition: WeatherCondition::Sleet,
            updated_at: Utc::now(),
        };
        let obs = WeatherObservation::from(&current);
        assert_eq!(obs.temp, 3.4);
        assert_eq!(obs.primary_condition(), "Snow");
        assert_eq!(obs.weather[0].description.as_deref(), Some("Sleet"));
        assert!(obs.has_precipitation());
    }
}
