//! Reducing-balance EMI math and interest-rate risk bands.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Annual rates above this are predatory. The boundary itself is not.
pub const PREDATORY_ANNUAL_RATE_PERCENT: f64 = 36.0;

/// Annual rates above this (up to the predatory line) are elevated.
pub const ELEVATED_ANNUAL_RATE_PERCENT: f64 = 24.0;

/// How risky an annual interest rate is for a retail borrower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    High,
    Elevated,
    Standard,
}

impl RiskBand {
    pub fn for_annual_rate(annual_rate_percent: f64) -> Self {
        if annual_rate_percent > PREDATORY_ANNUAL_RATE_PERCENT {
            RiskBand::High
        } else if annual_rate_percent > ELEVATED_ANNUAL_RATE_PERCENT {
            RiskBand::Elevated
        } else {
            RiskBand::Standard
        }
    }
}

/// Validated terms of one loan quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    principal_rupees: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
}

impl LoanTerms {
    /// Validates and constructs loan terms.
    ///
    /// Principal must be positive, the rate non-negative (zero means an
    /// interest-free loan), and the tenure at least one month.
    pub fn new(
        principal_rupees: f64,
        annual_rate_percent: f64,
        tenure_months: u32,
    ) -> Result<Self, ValidationError> {
        if !principal_rupees.is_finite() || principal_rupees <= 0.0 {
            return Err(ValidationError::invalid_format(
                "principal",
                "must be a positive rupee amount",
            ));
        }
        if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
            return Err(ValidationError::invalid_format(
                "annual_rate",
                "must be zero or a positive percentage",
            ));
        }
        if tenure_months == 0 {
            return Err(ValidationError::invalid_format(
                "tenure_months",
                "must be at least one month",
            ));
        }
        Ok(Self {
            principal_rupees,
            annual_rate_percent,
            tenure_months,
        })
    }

    pub fn principal_rupees(&self) -> f64 {
        self.principal_rupees
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn tenure_months(&self) -> u32 {
        self.tenure_months
    }

    pub fn risk_band(&self) -> RiskBand {
        RiskBand::for_annual_rate(self.annual_rate_percent)
    }

    pub fn is_predatory(&self) -> bool {
        self.risk_band() == RiskBand::High
    }

    /// Computes the repayment schedule.
    ///
    /// `EMI = P * r * (1+r)^n / ((1+r)^n - 1)` with r the monthly rate;
    /// an interest-free loan degenerates to `P / n`.
    pub fn schedule(&self) -> EmiSchedule {
        let principal = self.principal_rupees;
        let n = self.tenure_months as f64;
        let monthly_rate = self.annual_rate_percent / (12.0 * 100.0);

        let monthly_emi = if monthly_rate == 0.0 {
            principal / n
        } else {
            let growth = (1.0 + monthly_rate).powf(n);
            principal * monthly_rate * growth / (growth - 1.0)
        };

        let total_payment = monthly_emi * n;
        let total_interest = total_payment - principal;
        let interest_percentage = total_interest / principal * 100.0;

        EmiSchedule {
            monthly_emi,
            total_payment,
            total_interest,
            interest_percentage,
        }
    }
}

/// Derived repayment figures for a [`LoanTerms`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmiSchedule {
    monthly_emi: f64,
    total_payment: f64,
    total_interest: f64,
    interest_percentage: f64,
}

impl EmiSchedule {
    pub fn monthly_emi(&self) -> f64 {
        self.monthly_emi
    }

    pub fn total_payment(&self) -> f64 {
        self.total_payment
    }

    pub fn total_interest(&self) -> f64 {
        self.total_interest
    }

    /// Total interest as a percentage of the principal.
    pub fn interest_percentage(&self) -> f64 {
        self.interest_percentage
    }

    /// Monthly EMI rounded to whole rupees for citizen-facing text.
    pub fn monthly_emi_rupees(&self) -> u64 {
        self.monthly_emi.round().max(0.0) as u64
    }

    pub fn total_payment_rupees(&self) -> u64 {
        self.total_payment.round().max(0.0) as u64
    }

    pub fn total_interest_rupees(&self) -> u64 {
        self.total_interest.round().max(0.0) as u64
    }
}
