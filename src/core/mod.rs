pub mod disaggregation;
pub mod enrichment;
pub mod savings;
pub mod units;
