//! Right-to-information grievance drafting: categories, reference
//! templates, and the per-session draft state machine.

mod category;
mod draft;
mod template;

pub use category::GrievanceCategory;
pub use draft::{GrievanceDraft, GrievanceStage, MAX_CLARIFY_ROUNDS, MIN_COMPLAINT_WORDS};
pub use template::{GrievanceTemplate, RESPONSE_WINDOW_DAYS, STANDARD_FEE_RUPEES};
