// Service exports
pub mod odsay;

pub use odsay::{OdsayClient, OdsayError};
