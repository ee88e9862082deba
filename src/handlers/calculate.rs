use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    engine::{self, models::SavingsReport},
    error::AppError,
    tariffs::Tariffs,
};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<arc_swap::ArcSwap<crate::config::Config>>,
    pub tariffs: Arc<Tariffs>,
}

/// Handle POST /calculate
///
/// Validates the raw body, runs the savings engine and returns the report
/// rounded to 2 decimals. Validation failures map to 400 with a
/// zero-filled report via `AppError`.
pub async fn handle_calculate(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<SavingsReport>, AppError> {
    // An absent or unparseable body validates like an empty one: every
    // required field is reported missing
    let body = body.map(|Json(value)| value).unwrap_or(Value::Null);

    let request = engine::parse_request(&body, &state.tariffs)?;

    tracing::info!(
        fuel_type = %request.fuel_type,
        distance = request.distance,
        tier = request.ebucks_level,
        solar = request.has_solar,
        no_bank = request.has_no_bank,
        loan_term_years = request.loan_term_years,
        "Handling savings calculation"
    );

    let report = engine::compute_savings(&request, &state.tariffs)?;

    tracing::debug!(
        total_savings = report.total_savings,
        upfront_savings = report.upfront_savings,
        "Calculation complete"
    );

    Ok(Json(report.rounded()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use arc_swap::ArcSwap;
    use serde_json::json;

    fn test_state() -> AppState {
        AppState {
            config: Arc::new(ArcSwap::from_pointee(Config::default())),
            tariffs: Arc::new(Tariffs::default()),
        }
    }

    #[tokio::test]
    async fn test_handle_calculate_success() {
        let body = json!({
            "ebucksLevel": 4,
            "fuelType": "diesel",
            "distance": 1500,
            "hasInsurance": false,
            "hasFinancing": false,
            "hasSolar": false,
        });

        let result = handle_calculate(State(test_state()), Some(Json(body))).await;
        let Json(report) = result.unwrap();
        assert!(report.total_savings > 0.0);
        assert_eq!(report.co2_emissions.ice, 282.0);
    }

    #[tokio::test]
    async fn test_handle_calculate_missing_body() {
        let result = handle_calculate(State(test_state()), None).await;
        assert!(matches!(result, Err(AppError::MissingFields(_))));
    }

    #[tokio::test]
    async fn test_handle_calculate_rounds_response() {
        let body = json!({
            "ebucksLevel": 3,
            "fuelType": "petrol93",
            "distance": 1234.5,
            "hasInsurance": true,
            "hasFinancing": false,
            "hasSolar": true,
        });

        let Json(report) = handle_calculate(State(test_state()), Some(Json(body)))
            .await
            .unwrap();
        for value in [
            report.present_value_ebucks,
            report.carbon_tax_savings,
            report.fuel_spend_savings,
            report.total_savings,
            report.co2_emissions.monthly_savings,
        ] {
            assert!(((value * 100.0).round() - value * 100.0).abs() < 1e-9);
        }
    }
}
