//! Per-category drafting templates: addressee and information requests.
//!
//! The statutory fee is ₹10 under the RTI Act, 2005; Below Poverty Line
//! applicants are exempt under Section 7(5).

use super::category::GrievanceCategory;

/// Statutory application fee in rupees.
pub const STANDARD_FEE_RUPEES: u32 = 10;

/// Statutory response window in days.
pub const RESPONSE_WINDOW_DAYS: u32 = 30;

/// Drafting material for one grievance category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrievanceTemplate {
    /// Department the application is addressed to.
    pub department: &'static str,
    /// Designation of the Public Information Officer.
    pub pio: &'static str,
    /// Information requests the formal draft should make.
    pub information_requests: &'static [&'static str],
}

impl GrievanceCategory {
    /// The drafting template for this category.
    pub fn template(&self) -> &'static GrievanceTemplate {
        match self {
            GrievanceCategory::RationCardDelay => &RATION_CARD_DELAY,
            GrievanceCategory::PensionDelay => &PENSION_DELAY,
            GrievanceCategory::RoadRepair => &ROAD_REPAIR,
            GrievanceCategory::WaterSupply => &WATER_SUPPLY,
            GrievanceCategory::SchemeBenefitNotReceived => &SCHEME_BENEFIT_NOT_RECEIVED,
            GrievanceCategory::ElectricityIssue => &ELECTRICITY_ISSUE,
            GrievanceCategory::MgnregaWageDelay => &MGNREGA_WAGE_DELAY,
            GrievanceCategory::General => &GENERAL,
        }
    }
}

static RATION_CARD_DELAY: GrievanceTemplate = GrievanceTemplate {
    department: "Food & Civil Supplies Department",
    pio: "District Food & Civil Supplies Officer (DFSO)",
    information_requests: &[
        "When was the application submitted and what is the application/reference number?",
        "What is the current status and reason for delay beyond the prescribed 15-day timeline?",
        "How many similar applications are pending in the applicant's district?",
        "What action has been taken against officials responsible for the delay?",
    ],
};

static PENSION_DELAY: GrievanceTemplate = GrievanceTemplate {
    department: "Social Welfare Department",
    pio: "District Social Welfare Officer",
    information_requests: &[
        "What is the current status of the pension application and reason for delay?",
        "On what date will the pension payments begin?",
        "How many pension applications are pending in the district?",
        "What corrective measures are being taken to clear the backlog?",
    ],
};

static ROAD_REPAIR: GrievanceTemplate = GrievanceTemplate {
    department: "Public Works Department (PWD)",
    pio: "Executive Engineer, PWD Division",
    information_requests: &[
        "What is the current condition report of the road and last maintenance date?",
        "What budget has been allocated for repair and what is the timeline?",
        "How many accidents have been reported on this road in the last 12 months?",
        "What action has been taken on previous complaints regarding this road?",
    ],
};

static WATER_SUPPLY: GrievanceTemplate = GrievanceTemplate {
    department: "Public Health Engineering / Jal Shakti Department",
    pio: "Executive Engineer, PHED Division",
    information_requests: &[
        "What is the schedule and source of water supply in the applicant's area?",
        "What is the reason for irregular or absent water supply?",
        "What budget has been allocated for water infrastructure improvement?",
        "When will regular supply be restored?",
    ],
};

static SCHEME_BENEFIT_NOT_RECEIVED: GrievanceTemplate = GrievanceTemplate {
    department: "Department administering the scheme concerned",
    pio: "District level officer of the concerned department",
    information_requests: &[
        "What is the current status of the applicant's enrollment in the scheme?",
        "If approved, on what date was the benefit disbursed and to which account?",
        "If rejected, what is the reason for rejection and the appeal process?",
        "How many beneficiaries in the district are yet to receive their benefits?",
    ],
};

static ELECTRICITY_ISSUE: GrievanceTemplate = GrievanceTemplate {
    department: "State Electricity Distribution Company (DISCOM)",
    pio: "Superintending Engineer, DISCOM",
    information_requests: &[
        "What is the status of the electricity connection application or complaint?",
        "What is the reason for power outages and the expected resolution date?",
        "What is the average power supply in hours in the applicant's area?",
        "What compensation is applicable under consumer protection norms?",
    ],
};

static MGNREGA_WAGE_DELAY: GrievanceTemplate = GrievanceTemplate {
    department: "District Rural Development Agency (DRDA)",
    pio: "District Programme Coordinator, MGNREGA",
    information_requests: &[
        "What is the total number of days worked and wage due to the applicant?",
        "Why have wages not been paid within the statutory 15-day period?",
        "What compensation is due under the delayed payment provisions of MGNREGA?",
        "How many workers in the district have pending wage payments?",
    ],
};

static GENERAL: GrievanceTemplate = GrievanceTemplate {
    department: "Concerned department (identified from the complaint)",
    pio: "Public Information Officer of the concerned department",
    information_requests: &[
        "Please provide complete information regarding the subject matter.",
        "What actions have been taken on previous requests or complaints?",
        "What is the timeline for resolution?",
        "Who is the responsible officer?",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_template() {
        for category in GrievanceCategory::all() {
            let template = category.template();
            assert!(!template.department.is_empty());
            assert!(!template.pio.is_empty());
            assert!(template.information_requests.len() >= 3);
        }
    }

    #[test]
    fn pension_template_names_social_welfare() {
        let template = GrievanceCategory::PensionDelay.template();
        assert_eq!(template.department, "Social Welfare Department");
    }
}
