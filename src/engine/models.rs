use serde::{Deserialize, Serialize};

/// Validated input for one savings calculation
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsRequest {
    /// eBucks tier, 1..=5
    pub ebucks_level: u8,
    pub fuel_type: String,
    /// Monthly distance driven, km
    pub distance: f64,
    pub has_insurance: bool,
    pub has_financing: bool,
    pub has_solar: bool,
    /// Overrides all banking benefits to zero when set
    pub has_no_bank: bool,
    /// Financing horizon for the fuel-cost projection, years
    pub loan_term_years: u32,
}

/// Fixed-tier reference benefits computed alongside every report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardBenefits {
    pub present_value_ebucks: f64,
    pub carbon_tax_savings: f64,
    pub upfront_savings: f64,
}

/// Monthly/yearly CO2 comparison between the ICE and EV options, kg
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Co2Emissions {
    pub ice: f64,
    pub ev: f64,
    pub monthly_savings: f64,
    pub yearly_savings: f64,
}

/// Full savings breakdown returned to the client.
///
/// Monetary fields are ZAR present values; internal accumulation keeps
/// full precision and `rounded` is applied only at the response boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsReport {
    pub present_value_ebucks: f64,
    pub carbon_tax_savings: f64,
    pub fuel_spend_savings: f64,
    pub upfront_savings: f64,
    pub total_savings: f64,
    pub standard_upfront_benefits: StandardBenefits,
    pub co2_emissions: Co2Emissions,
}

impl SavingsReport {
    /// Zero-filled report shape, used for every error response so the
    /// contract stays stable for clients even on failure.
    pub fn zeroed() -> Self {
        Self {
            present_value_ebucks: 0.0,
            carbon_tax_savings: 0.0,
            fuel_spend_savings: 0.0,
            upfront_savings: 0.0,
            total_savings: 0.0,
            standard_upfront_benefits: StandardBenefits {
                present_value_ebucks: 0.0,
                carbon_tax_savings: 0.0,
                upfront_savings: 0.0,
            },
            co2_emissions: Co2Emissions {
                ice: 0.0,
                ev: 0.0,
                monthly_savings: 0.0,
                yearly_savings: 0.0,
            },
        }
    }

    /// Copy with every monetary and emissions figure rounded to 2 decimals
    pub fn rounded(&self) -> Self {
        Self {
            present_value_ebucks: round2(self.present_value_ebucks),
            carbon_tax_savings: round2(self.carbon_tax_savings),
            fuel_spend_savings: round2(self.fuel_spend_savings),
            upfront_savings: round2(self.upfront_savings),
            total_savings: round2(self.total_savings),
            standard_upfront_benefits: StandardBenefits {
                present_value_ebucks: round2(self.standard_upfront_benefits.present_value_ebucks),
                carbon_tax_savings: round2(self.standard_upfront_benefits.carbon_tax_savings),
                upfront_savings: round2(self.standard_upfront_benefits.upfront_savings),
            },
            co2_emissions: Co2Emissions {
                ice: round2(self.co2_emissions.ice),
                ev: round2(self.co2_emissions.ev),
                monthly_savings: round2(self.co2_emissions.monthly_savings),
                yearly_savings: round2(self.co2_emissions.yearly_savings),
            },
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_report_serializes_full_shape() {
        let json = serde_json::to_value(SavingsReport::zeroed()).unwrap();
        assert_eq!(json["presentValueEbucks"], 0.0);
        assert_eq!(json["standardUpfrontBenefits"]["upfrontSavings"], 0.0);
        assert_eq!(json["co2Emissions"]["yearlySavings"], 0.0);
    }

    #[test]
    fn test_rounded_to_two_decimals() {
        let mut report = SavingsReport::zeroed();
        report.fuel_spend_savings = 1234.5678;
        report.co2_emissions.monthly_savings = 26.849999999;
        let rounded = report.rounded();
        assert_eq!(rounded.fuel_spend_savings, 1234.57);
        assert_eq!(rounded.co2_emissions.monthly_savings, 26.85);
    }
}
