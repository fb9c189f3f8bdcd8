pub mod leads;
pub mod pricing;
pub mod promotions;
pub mod quiz;
