//! The savings calculator: a pure function of the validated request and
//! the tariff tables. No state survives between calls.

use super::models::{Co2Emissions, SavingsReport, SavingsRequest, StandardBenefits};
use super::pv;
use crate::error::AppError;
use crate::tariffs::{Tariffs, STANDARD_TIER};

/// Compute the full savings breakdown for one request.
///
/// Returns full-precision figures; rounding happens at the response
/// boundary.
pub fn compute_savings(
    request: &SavingsRequest,
    tariffs: &Tariffs,
) -> Result<SavingsReport, AppError> {
    let fuel_price = tariffs
        .fuel_price(&request.fuel_type)
        .ok_or_else(|| AppError::InvalidFuelType(request.fuel_type.clone()))?;
    let consumption_rate = tariffs
        .consumption(&request.fuel_type)
        .ok_or_else(|| AppError::InvalidFuelType(request.fuel_type.clone()))?;

    let monthly_litres = consumption_rate * request.distance / 100.0;
    let monthly_fuel_spend = monthly_litres * fuel_price;

    let pv_fuel_cost =
        ice_fuel_cost_pv(monthly_fuel_spend, request.loan_term_years, tariffs);
    let pv_ev_cost = ev_charging_cost_pv(
        request.distance,
        request.has_solar,
        request.loan_term_years,
        tariffs,
    );
    let fuel_spend_savings = pv_fuel_cost - pv_ev_cost;

    // Banking benefits are zeroed entirely for customers without an account
    let (pv_ebucks, carbon_tax_savings) = if request.has_no_bank {
        (0.0, 0.0)
    } else {
        let total_rate = tariffs.base_rate(request.ebucks_level)
            + if request.has_insurance {
                tariffs.insurance_rate(request.ebucks_level)
            } else {
                0.0
            }
            + if request.has_financing {
                tariffs.financing_rate(request.ebucks_level)
            } else {
                0.0
            };
        (
            ebucks_pv(monthly_fuel_spend, fuel_price, total_rate, tariffs),
            carbon_tax_pv(monthly_litres, tariffs),
        )
    };

    let upfront_savings = pv_ebucks + carbon_tax_savings;
    let total_savings = upfront_savings + fuel_spend_savings;

    Ok(SavingsReport {
        present_value_ebucks: pv_ebucks,
        carbon_tax_savings,
        fuel_spend_savings,
        upfront_savings,
        total_savings,
        standard_upfront_benefits: standard_upfront_benefits(
            request.distance,
            &request.fuel_type,
            tariffs,
        )?,
        co2_emissions: co2_emissions(
            request.distance,
            monthly_litres,
            request.has_solar,
            tariffs,
        ),
    })
}

/// Present value of ICE fuel spend over the loan term, with fuel-price
/// inflation applied year on year.
fn ice_fuel_cost_pv(monthly_fuel_spend: f64, loan_term_years: u32, tariffs: &Tariffs) -> f64 {
    let year1_cost = monthly_fuel_spend * 12.0;
    let mut total = 0.0;
    for i in 0..loan_term_years {
        let cost = year1_cost * (1.0 + tariffs.fuel_inflation).powi(i as i32);
        total += pv::present_value(cost, tariffs.discount_rate, i + 1);
    }
    total
}

/// Present value of EV charging over the loan term.
///
/// Solar charging reduces the cost to a tenth, it does not eliminate it.
/// Electricity costs are not inflated, unlike fuel.
fn ev_charging_cost_pv(
    distance: f64,
    has_solar: bool,
    loan_term_years: u32,
    tariffs: &Tariffs,
) -> f64 {
    let mut annual_cost = distance * 12.0 * tariffs.ev_consumption * tariffs.eskom_rate;
    if has_solar {
        annual_cost *= 0.1;
    }
    (0..loan_term_years)
        .map(|i| pv::present_value(annual_cost, tariffs.discount_rate, i + 1))
        .sum()
}

/// Present value of eBucks earned on qualifying fuel spend.
///
/// The rebate program's horizon is fixed regardless of the loan term.
fn ebucks_pv(monthly_fuel_spend: f64, fuel_price: f64, total_rate: f64, tariffs: &Tariffs) -> f64 {
    let qualifying_spend = monthly_fuel_spend.min(tariffs.monthly_fuel_spend_cap);
    let qualifying_litres = qualifying_spend / fuel_price;
    let year1_ebucks = total_rate * qualifying_litres * 12.0;
    pv::present_value_of_growing_annuity(
        year1_ebucks,
        tariffs.fuel_inflation,
        tariffs.discount_rate,
        tariffs.projection_years,
    )
}

/// Present value of avoided carbon tax over the fixed program horizon.
fn carbon_tax_pv(monthly_litres: f64, tariffs: &Tariffs) -> f64 {
    let annual_litres = monthly_litres * 12.0;
    let annual_tonnes = annual_litres * tariffs.co2_per_litre / 1000.0;
    let mut total = 0.0;
    for i in 0..tariffs.projection_years {
        let year = tariffs.carbon_tax_base_year + i as i32;
        let annual_cost = annual_tonnes * tariffs.carbon_tax_rate(year);
        total += pv::present_value(annual_cost, tariffs.discount_rate, i + 1);
    }
    total
}

/// Monthly and yearly CO2 comparison.
///
/// Solar substitutes the emission intensity on the raw distance; the 0.1
/// cost multiplier in the charging projection is deliberately not applied
/// here, since a tenth of charging still draws grid power.
fn co2_emissions(
    distance: f64,
    monthly_litres: f64,
    has_solar: bool,
    tariffs: &Tariffs,
) -> Co2Emissions {
    let ice = monthly_litres * tariffs.co2_per_litre;
    let intensity = if has_solar {
        tariffs.co2_solar
    } else {
        tariffs.co2_grid
    };
    let ev = distance * tariffs.ev_consumption * intensity;
    let monthly_savings = ice - ev;
    Co2Emissions {
        ice,
        ev,
        monthly_savings,
        yearly_savings: monthly_savings * 12.0,
    }
}

/// Reference benefits at the standard tier over the fixed horizon,
/// ignoring the caller's tier, flags and loan term. All three rebate
/// components are applied.
fn standard_upfront_benefits(
    distance: f64,
    fuel_type: &str,
    tariffs: &Tariffs,
) -> Result<StandardBenefits, AppError> {
    let fuel_price = tariffs
        .fuel_price(fuel_type)
        .ok_or_else(|| AppError::InvalidFuelType(fuel_type.to_string()))?;
    let consumption_rate = tariffs
        .consumption(fuel_type)
        .ok_or_else(|| AppError::InvalidFuelType(fuel_type.to_string()))?;

    let monthly_litres = consumption_rate * distance / 100.0;
    let monthly_fuel_spend = monthly_litres * fuel_price;

    let total_rate = tariffs.base_rate(STANDARD_TIER)
        + tariffs.insurance_rate(STANDARD_TIER)
        + tariffs.financing_rate(STANDARD_TIER);

    let present_value_ebucks = ebucks_pv(monthly_fuel_spend, fuel_price, total_rate, tariffs);
    let carbon_tax_savings = carbon_tax_pv(monthly_litres, tariffs);

    Ok(StandardBenefits {
        present_value_ebucks,
        carbon_tax_savings,
        upfront_savings: present_value_ebucks + carbon_tax_savings,
    })
}
