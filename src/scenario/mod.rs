pub mod aggregate;
pub mod controller;
pub mod decay;
pub mod detail;
pub mod filters;
pub mod insights;
pub mod quality;
pub mod rollup;
pub mod selection;
pub mod storm;
