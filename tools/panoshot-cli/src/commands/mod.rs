pub mod capture;
pub mod check;
