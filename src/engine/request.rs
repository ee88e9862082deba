//! Request validation: field presence, numeric parsing and domain checks.
//!
//! Every check runs before any arithmetic; the engine never partially
//! computes on invalid input.

use serde_json::Value;

use super::models::SavingsRequest;
use crate::error::AppError;
use crate::tariffs::Tariffs;

/// Upper bound on monthly distance, km. Keeps the projections finite;
/// anything near this is nonsense input anyway.
const MAX_MONTHLY_DISTANCE_KM: f64 = 1_000_000.0;

const REQUIRED_FIELDS: [&str; 6] = [
    "ebucksLevel",
    "fuelType",
    "distance",
    "hasInsurance",
    "hasFinancing",
    "hasSolar",
];

/// Parse and validate a raw JSON body into a `SavingsRequest`.
pub fn parse_request(body: &Value, tariffs: &Tariffs) -> Result<SavingsRequest, AppError> {
    let object = body
        .as_object()
        .filter(|o| !o.is_empty())
        .ok_or_else(all_fields_missing)?;

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    let ebucks_level = parse_integer(&object["ebucksLevel"], "ebucksLevel")?;
    if !(1..=5).contains(&ebucks_level) {
        return Err(AppError::InvalidNumericValue {
            field: "ebucksLevel",
            message: format!("must be between 1 and 5, got {}", ebucks_level),
        });
    }

    let fuel_type = object["fuelType"]
        .as_str()
        .ok_or_else(|| AppError::InvalidFuelType(object["fuelType"].to_string()))?
        .to_string();
    if tariffs.fuel_price(&fuel_type).is_none() {
        return Err(AppError::InvalidFuelType(fuel_type));
    }

    let distance = parse_number(&object["distance"], "distance")?;
    if !distance.is_finite() || distance < 0.0 {
        return Err(AppError::InvalidNumericValue {
            field: "distance",
            message: format!("must be a non-negative number, got {}", distance),
        });
    }
    if distance > MAX_MONTHLY_DISTANCE_KM {
        return Err(AppError::InvalidNumericValue {
            field: "distance",
            message: format!(
                "must be at most {} km per month, got {}",
                MAX_MONTHLY_DISTANCE_KM, distance
            ),
        });
    }

    let has_insurance = parse_bool(&object["hasInsurance"], "hasInsurance")?;
    let has_financing = parse_bool(&object["hasFinancing"], "hasFinancing")?;
    let has_solar = parse_bool(&object["hasSolar"], "hasSolar")?;

    let has_no_bank = match object.get("hasNoBank") {
        None | Some(Value::Null) => false,
        Some(value) => parse_bool(value, "hasNoBank")?,
    };

    let loan_term_years = match object.get("loanTermYears") {
        None | Some(Value::Null) => tariffs.projection_years,
        Some(value) => {
            let years = parse_integer(value, "loanTermYears")?;
            if !(1..=100).contains(&years) {
                return Err(AppError::InvalidNumericValue {
                    field: "loanTermYears",
                    message: format!("must be between 1 and 100, got {}", years),
                });
            }
            years as u32
        }
    };

    Ok(SavingsRequest {
        ebucks_level: ebucks_level as u8,
        fuel_type,
        distance,
        has_insurance,
        has_financing,
        has_solar,
        has_no_bank,
        loan_term_years,
    })
}

fn all_fields_missing() -> AppError {
    AppError::MissingFields(REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect())
}

/// Integers arrive as JSON numbers or numeric strings ("4" is valid input
/// from form-driven clients, "4.5" is not).
fn parse_integer(value: &Value, field: &'static str) -> Result<i64, AppError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            // 4.0 counts as an integer, 4.5 does not
            if let Some(f) = n.as_f64() {
                if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    return Ok(f as i64);
                }
            }
            Err(AppError::InvalidNumericValue {
                field,
                message: format!("expected an integer, got {}", n),
            })
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| {
            AppError::InvalidNumericValue {
                field,
                message: format!("expected an integer, got \"{}\"", s),
            }
        }),
        other => Err(AppError::InvalidNumericValue {
            field,
            message: format!("expected an integer, got {}", other),
        }),
    }
}

fn parse_number(value: &Value, field: &'static str) -> Result<f64, AppError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| AppError::InvalidNumericValue {
            field,
            message: format!("expected a number, got {}", n),
        }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            AppError::InvalidNumericValue {
                field,
                message: format!("expected a number, got \"{}\"", s),
            }
        }),
        other => Err(AppError::InvalidNumericValue {
            field,
            message: format!("expected a number, got {}", other),
        }),
    }
}

fn parse_bool(value: &Value, field: &'static str) -> Result<bool, AppError> {
    value.as_bool().ok_or_else(|| AppError::InvalidNumericValue {
        field,
        message: format!("expected a boolean, got {}", value),
    })
}
