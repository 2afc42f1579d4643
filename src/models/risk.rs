use serde::{Deserialize, Serialize};

/// A scored location. The service speaks `lat` / `long`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "long")]
    pub longitude: f64,
    pub risk: f64,
}

impl RiskPoint {
    pub fn new(latitude: f64, longitude: f64, risk: f64) -> Self {
        Self {
            latitude,
            longitude,
            risk,
        }
    }

    /// Risk as a percentage, e.g. `0.734` -> `73.4`.
    pub fn risk_percent(&self) -> f64 {
        self.risk * 100.0
    }
}

pub type Prediction = RiskPoint;
pub type Hotspot = RiskPoint;

/// `GET /predict`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionsResponse {
    #[serde(default)]
    pub locations: Vec<Prediction>,
}

/// `GET /hotspots`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HotspotsResponse {
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_service_field_names() {
        let body = r#"{"locations":[{"lat":-2.33,"long":34.83,"risk":0.91}]}"#;
        let parsed: PredictionsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.locations, vec![RiskPoint::new(-2.33, 34.83, 0.91)]);
    }

    #[test]
    fn missing_hotspot_list_is_empty() {
        let parsed: HotspotsResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.hotspots.is_empty());
    }
}
