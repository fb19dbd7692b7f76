/**
 * State Accounts for Investment Desk
 * 
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

pub mod config;
pub mod plan;
pub mod payment_method;
pub mod profile;
pub mod investment;
pub mod withdrawal;

pub use config::*;
pub use plan::*;
pub use payment_method::*;
pub use profile::*;
pub use investment::*;
pub use withdrawal::*;

use crate::DeskError;

/// Length check shared by every bounded string field
pub fn validate_text(value: &str, max_len: usize) -> core::result::Result<(), DeskError> {
    if value.trim().is_empty() || value.len() > max_len {
        return Err(DeskError::InvalidText);
    }
    Ok(())
}
