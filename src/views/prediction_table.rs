// ============================================================================
// PREDICTION TABLE - Highest-risk locations first
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::models::Prediction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn from_risk(risk: f64) -> Self {
        if risk > 0.7 {
            RiskLevel::High
        } else if risk > 0.4 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            RiskLevel::High => "risk risk-high",
            RiskLevel::Medium => "risk risk-medium",
            RiskLevel::Low => "risk risk-low",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PredictionRow {
    pub location: String,
    pub risk: String,
    pub level: RiskLevel,
}

impl PredictionRow {
    fn from_prediction(prediction: &Prediction) -> Self {
        Self {
            location: format!("{:.2}°, {:.2}°", prediction.latitude, prediction.longitude),
            risk: format!("{:.1}%", prediction.risk_percent()),
            level: RiskLevel::from_risk(prediction.risk),
        }
    }
}

/// Stable sort by descending risk, then the first `limit` rows. Equal
/// risks keep their input order.
pub fn top_predictions(predictions: &[Prediction], limit: usize) -> Vec<PredictionRow> {
    let mut sorted: Vec<&Prediction> = predictions.iter().collect();
    sorted.sort_by(|a, b| b.risk.total_cmp(&a.risk));
    sorted
        .into_iter()
        .take(limit)
        .map(PredictionRow::from_prediction)
        .collect()
}

pub fn render_prediction_table(predictions: &[Prediction], limit: usize) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("tr")?
        .child(ElementBuilder::new("th")?.text("Location").build())?
        .child(ElementBuilder::new("th")?.text("Risk Score").build())?
        .build();

    let mut rows = Vec::new();
    for row in top_predictions(predictions, limit) {
        let risk = ElementBuilder::new("span")?
            .class(row.level.css_class())
            .text(&row.risk)
            .build();
        rows.push(
            ElementBuilder::new("tr")?
                .child(ElementBuilder::new("td")?.text(&row.location).build())?
                .child(ElementBuilder::new("td")?.child(risk)?.build())?
                .build(),
        );
    }

    let table = ElementBuilder::new("table")?
        .class("prediction-table")
        .child(ElementBuilder::new("thead")?.child(header)?.build())?
        .child(ElementBuilder::new("tbody")?.children(rows)?.build())?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("prediction-table-scroll")
        .child(table)?
        .build())
}
