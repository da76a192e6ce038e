pub mod compare;
pub mod engines;
