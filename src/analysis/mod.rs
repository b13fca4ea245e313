pub mod correlation;
pub mod features;
pub mod filter;
