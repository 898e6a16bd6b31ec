pub mod ffc_ist;
pub mod fit_results;
pub mod numfmt;
pub mod sdf;
pub mod zone;
