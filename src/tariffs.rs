use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Reference tier used for the standard upfront-benefits comparison.
pub const STANDARD_TIER: u8 = 4;

/// Rate tables and program constants for the savings engine.
///
/// Built once at process start and shared read-only across requests;
/// every calculation is a pure function of these tables and the request.
#[derive(Debug, Clone, Serialize)]
pub struct Tariffs {
    /// Fuel price in ZAR per litre, keyed by fuel type
    pub fuel_prices: HashMap<String, f64>,
    /// Fuel consumption in litres per 100 km, keyed by fuel type
    pub fuel_consumption: HashMap<String, f64>,
    /// Base eBucks rate in ZAR per litre, index = tier - 1
    pub base_ebucks: [f64; 5],
    /// Insurance eBucks rate in ZAR per litre, index = tier - 1
    pub insurance_rates: [f64; 5],
    /// Financing eBucks rate in ZAR per litre, index = tier - 1
    pub financing_rates: [f64; 5],
    /// Maximum monthly fuel spend qualifying for eBucks, ZAR
    pub monthly_fuel_spend_cap: f64,
    /// Annual fuel price inflation
    pub fuel_inflation: f64,
    /// Annual discount rate for present-value calculations
    pub discount_rate: f64,
    /// Fixed horizon in years for the rebate and carbon-tax projections
    pub projection_years: u32,
    /// Carbon tax in ZAR per tonne CO2, keyed by calendar year
    pub carbon_tax: BTreeMap<i32, f64>,
    /// First calendar year of the carbon-tax projection
    pub carbon_tax_base_year: i32,
    /// kg CO2 emitted per litre of fuel burned
    pub co2_per_litre: f64,
    /// EV energy consumption in kWh per km
    pub ev_consumption: f64,
    /// Blended electricity rate in ZAR per kWh
    pub eskom_rate: f64,
    /// kg CO2 per kWh of grid electricity
    pub co2_grid: f64,
    /// kg CO2 per kWh of solar electricity (not zero)
    pub co2_solar: f64,
}

impl Default for Tariffs {
    fn default() -> Self {
        let fuel_prices = HashMap::from([
            ("diesel".to_string(), 19.32),
            ("petrol95".to_string(), 21.62),
            ("petrol93".to_string(), 21.51),
        ]);
        let fuel_consumption = HashMap::from([
            ("diesel".to_string(), 8.0),
            ("petrol95".to_string(), 9.5),
            ("petrol93".to_string(), 9.3),
        ]);
        let carbon_tax = BTreeMap::from([
            (2025, 236.0),
            (2026, 308.0),
            (2027, 347.0),
            (2028, 390.0),
            (2029, 440.0),
            (2030, 495.0),
            (2031, 495.0),
            (2032, 495.0),
        ]);

        // 90% of charging at the standard Eskom rate, 10% at the premium rate
        let standard_eskom_rate = 3.7;
        let premium_eskom_rate = 7.0;

        Self {
            fuel_prices,
            fuel_consumption,
            base_ebucks: [
                0.40 * 0.75,
                0.80 * 0.75,
                1.60 * 0.75,
                3.20 * 0.75,
                4.00 * 0.75,
            ],
            insurance_rates: [0.10, 0.20, 0.40, 0.80, 2.00],
            financing_rates: [0.10, 0.20, 0.40, 0.80, 2.00],
            monthly_fuel_spend_cap: 3000.0,
            fuel_inflation: 0.09,
            discount_rate: 0.1095,
            projection_years: 5,
            carbon_tax,
            carbon_tax_base_year: 2025,
            co2_per_litre: 2.35,
            ev_consumption: 0.189,
            eskom_rate: standard_eskom_rate * 0.9 + premium_eskom_rate * 0.1,
            co2_grid: 0.9,
            co2_solar: 0.09,
        }
    }
}

impl Tariffs {
    pub fn fuel_price(&self, fuel_type: &str) -> Option<f64> {
        self.fuel_prices.get(fuel_type).copied()
    }

    pub fn consumption(&self, fuel_type: &str) -> Option<f64> {
        self.fuel_consumption.get(fuel_type).copied()
    }

    pub fn base_rate(&self, tier: u8) -> f64 {
        tier_rate(&self.base_ebucks, tier)
    }

    pub fn insurance_rate(&self, tier: u8) -> f64 {
        tier_rate(&self.insurance_rates, tier)
    }

    pub fn financing_rate(&self, tier: u8) -> f64 {
        tier_rate(&self.financing_rates, tier)
    }

    /// Carbon tax rate for a calendar year.
    ///
    /// Years past the end of the table clamp to the latest defined year's
    /// rate rather than extrapolating.
    pub fn carbon_tax_rate(&self, year: i32) -> f64 {
        if let Some(rate) = self.carbon_tax.get(&year) {
            return *rate;
        }
        self.carbon_tax
            .values()
            .next_back()
            .copied()
            .unwrap_or(0.0)
    }
}

fn tier_rate(rates: &[f64; 5], tier: u8) -> f64 {
    match tier {
        1..=5 => rates[(tier - 1) as usize],
        _ => 0.0,
    }
}
