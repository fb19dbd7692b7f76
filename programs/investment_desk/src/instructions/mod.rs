/**
 * Instructions for Investment Desk
 * 
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

pub mod platform;
pub mod plans;
pub mod payment_methods;
pub mod profiles;
pub mod admin_users;
pub mod investments;
pub mod lifecycle;
pub mod bonus;
pub mod referrals;
pub mod withdrawals;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use platform::*;
pub use plans::*;
pub use payment_methods::*;
pub use profiles::*;
pub use admin_users::*;
pub use investments::*;
pub use lifecycle::*;
pub use bonus::*;
pub use referrals::*;
pub use withdrawals::*;
