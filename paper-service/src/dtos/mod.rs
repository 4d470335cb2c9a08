pub mod paper;

pub use paper::{missing_fields, GeneratePaperRequest, GeneratePaperResponse, REQUIRED_FIELDS};
