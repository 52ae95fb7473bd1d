//! Threshold alert evaluation

use chrono::{DateTime, Utc};
use domain::{Alert, Observation, Thresholds};
use tracing::{debug, info};

/// Compares observations against thresholds and keeps a running alert log
///
/// The log is ordered and unbounded; it only grows.
#[derive(Debug, Clone, Default)]
pub struct AlertEvaluator {
    log: Vec<Alert>,
}

impl AlertEvaluator {
    /// Create an evaluator with an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate the latest observations, stamping alerts with the current time
    pub fn evaluate(&mut self, latest: &[Observation], thresholds: &Thresholds) -> Vec<Alert> {
        self.evaluate_at(latest, thresholds, Utc::now())
    }

    /// Evaluate the latest observations in the given order
    ///
    /// Per observation, checks run in the order temperature, humidity, wind,
    /// condition. Numeric checks are strict (`>`), the condition check is
    /// an exact case-sensitive match. New alerts are returned and appended
    /// to the log.
    pub fn evaluate_at(
        &mut self,
        latest: &[Observation],
        thresholds: &Thresholds,
        raised_at: DateTime<Utc>,
    ) -> Vec<Alert> {
        let mut raised = Vec::new();

        for obs in latest {
            if obs.temperature > thresholds.max_temp() {
                raised.push(Alert::temperature(
                    obs.city.clone(),
                    obs.temperature,
                    thresholds.max_temp(),
                    raised_at,
                ));
            }
            if obs.humidity.as_f64() > thresholds.max_humidity() {
                raised.push(Alert::humidity(
                    obs.city.clone(),
                    obs.humidity,
                    thresholds.max_humidity(),
                    raised_at,
                ));
            }
            if obs.wind_speed > thresholds.max_wind_speed() {
                raised.push(Alert::wind(
                    obs.city.clone(),
                    obs.wind_speed,
                    thresholds.max_wind_speed(),
                    raised_at,
                ));
            }
            if obs.condition_main == thresholds.watched_condition() {
                raised.push(Alert::condition(
                    obs.city.clone(),
                    &obs.condition_main,
                    raised_at,
                ));
            }
        }

        for alert in &raised {
            info!(city = %alert.city, kind = %alert.kind, "{}", alert.message);
        }
        debug!(evaluated = latest.len(), raised = raised.len(), "Evaluated thresholds");

        self.log.extend(raised.iter().cloned());
        raised
    }

    /// Full alert log, oldest first
    #[must_use]
    pub fn log(&self) -> &[Alert] {
        &self.log
    }

    /// Last `n` alerts, oldest first
    #[must_use]
    pub fn recent(&self, n: usize) -> &[Alert] {
        &self.log[self.log.len().saturating_sub(n)..]
    }

    /// Number of alerts ever raised
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Whether no alert has been raised yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use domain::{AlertKind, CityId, Humidity};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn calm(city: &str) -> Observation {
        Observation::new(CityId::parse(city).unwrap(), now())
            .with_condition("Clear", "clear sky")
            .with_temperature(25.0, 25.0)
            .with_humidity(Humidity::new(40).unwrap())
            .with_wind_speed(3.0)
    }

    #[test]
    fn mumbai_above_max_temp_raises_one_alert() {
        let mut evaluator = AlertEvaluator::new();
        let hot = calm("Mumbai").with_temperature(36.0, 39.0);

        let alerts = evaluator.evaluate_at(&[hot], &Thresholds::default(), now());

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Temperature);
        assert!(alerts[0].message.contains("Mumbai"));
        assert!(alerts[0].message.contains("36"));
        assert_eq!(evaluator.len(), 1);
    }

    #[test]
    fn limits_are_strict() {
        let mut evaluator = AlertEvaluator::new();
        let at_limit = calm("Delhi")
            .with_temperature(35.0, 35.0)
            .with_humidity(Humidity::new(80).unwrap())
            .with_wind_speed(10.0);

        assert!(evaluator.evaluate_at(&[at_limit], &Thresholds::default(), now()).is_empty());
        assert!(evaluator.is_empty());
    }

    #[test]
    fn all_checks_fire_in_order() {
        let mut evaluator = AlertEvaluator::new();
        let stormy = calm("Chennai")
            .with_condition("Rain", "heavy intensity rain")
            .with_temperature(36.5, 41.0)
            .with_humidity(Humidity::new(92).unwrap())
            .with_wind_speed(14.0);

        let kinds: Vec<AlertKind> = evaluator
            .evaluate_at(&[stormy], &Thresholds::default(), now())
            .iter()
            .map(|a| a.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                AlertKind::Temperature,
                AlertKind::Humidity,
                AlertKind::Wind,
                AlertKind::Condition
            ]
        );
    }

    #[test]
    fn condition_match_is_case_sensitive() {
        let mut evaluator = AlertEvaluator::new();
        let drizzle = calm("Kolkata").with_condition("rain", "light rain");
        assert!(evaluator.evaluate_at(&[drizzle], &Thresholds::default(), now()).is_empty());
    }

    #[test]
    fn follows_input_order() {
        let mut evaluator = AlertEvaluator::new();
        let a = calm("Hyderabad").with_temperature(37.0, 37.0);
        let b = calm("Bangalore").with_temperature(36.0, 36.0);

        let alerts = evaluator.evaluate_at(&[a, b], &Thresholds::default(), now());
        assert_eq!(alerts[0].city.as_str(), "Hyderabad");
        assert_eq!(alerts[1].city.as_str(), "Bangalore");
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let mut evaluator = AlertEvaluator::new();
        assert!(evaluator.evaluate(&[], &Thresholds::default()).is_empty());
    }

    #[test]
    fn recent_returns_tail_oldest_first() {
        let mut evaluator = AlertEvaluator::new();
        for temp in [36.0, 37.0, 38.0] {
            evaluator.evaluate_at(
                &[calm("Delhi").with_temperature(temp, temp)],
                &Thresholds::default(),
                now(),
            );
        }

        let recent = evaluator.recent(2);
        assert_eq!(recent.len(), 2);
        assert!(recent[0].message.contains("37.0"));
        assert!(recent[1].message.contains("38.0"));
        assert_eq!(evaluator.recent(10).len(), 3);
        assert!(evaluator.recent(0).is_empty());
    }
}
