//! Government lending schemes suggested in place of private credit.

/// One government loan scheme a citizen can be pointed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanAlternative {
    pub name: &'static str,
    pub rate: &'static str,
    pub amount: &'static str,
    pub audience: &'static str,
}

impl LoanAlternative {
    /// Single-line summary used when listing alternatives in a reply.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} interest, {}, for {}",
            self.name, self.rate, self.amount, self.audience
        )
    }
}

const GOVT_LOAN_ALTERNATIVES: &[LoanAlternative] = &[
    LoanAlternative {
        name: "PM MUDRA Yojana",
        rate: "7-9%",
        amount: "Up to ₹10 lakh",
        audience: "Small business",
    },
    LoanAlternative {
        name: "PM SVANidhi",
        rate: "7% subsidy",
        amount: "₹10,000-₹50,000",
        audience: "Street vendors",
    },
    LoanAlternative {
        name: "KCC (Kisan Credit Card)",
        rate: "4% (subsidized)",
        amount: "Up to ₹3 lakh",
        audience: "Farmers",
    },
    LoanAlternative {
        name: "Stand-Up India",
        rate: "Bank rate",
        amount: "₹10 lakh - ₹1 crore",
        audience: "SC/ST/Women entrepreneurs",
    },
    LoanAlternative {
        name: "PMEGP",
        rate: "25-35% subsidy",
        amount: "Up to ₹50 lakh",
        audience: "New businesses",
    },
    LoanAlternative {
        name: "SHG Bank Linkage",
        rate: "4-7%",
        amount: "Up to ₹20 lakh",
        audience: "Women's Self Help Groups",
    },
];

impl LoanAlternative {
    pub fn all() -> &'static [LoanAlternative] {
        GOVT_LOAN_ALTERNATIVES
    }

    /// The leading alternatives attached to predatory-rate warnings.
    pub fn top(n: usize) -> &'static [LoanAlternative] {
        &GOVT_LOAN_ALTERNATIVES[..n.min(GOVT_LOAN_ALTERNATIVES.len())]
    }
}
