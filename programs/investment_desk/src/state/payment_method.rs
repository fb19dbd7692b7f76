/**
 * Payment Method State
 *
 * Cryptocurrencies accepted for deposit-funded investments.
 *
 * Made by LabsX402 for Solana
 * https://x.com/LabsX402
 */

use anchor_lang::prelude::*;

use crate::{
    state::validate_text,
    DeskError,
    MAX_COIN_NAME_LEN,
    MAX_DEPOSIT_WALLET_LEN,
    MAX_NETWORK_LEN,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct PaymentMethodParams {
    /// Coin name, e.g. "USDT"
    pub name: String,
    /// Network, e.g. "TRC20"
    pub network: String,
    /// Deposit address shown to investors
    pub wallet: String,
}

impl PaymentMethodParams {
    pub fn validate(&self) -> core::result::Result<(), DeskError> {
        validate_text(&self.name, MAX_COIN_NAME_LEN)?;
        validate_text(&self.network, MAX_NETWORK_LEN)?;
        validate_text(&self.wallet, MAX_DEPOSIT_WALLET_LEN)?;
        Ok(())
    }
}

#[account]
pub struct PaymentMethod {
    pub id: u64,
    pub name: String,
    pub network: String,
    pub wallet: String,
    pub enabled: bool,
    pub bump: u8,
}

impl PaymentMethod {
    pub const LEN: usize = 8 + // discriminator
        8 +  // id
        4 + MAX_COIN_NAME_LEN +
        4 + MAX_NETWORK_LEN +
        4 + MAX_DEPOSIT_WALLET_LEN +
        1 +  // enabled
        1;   // bump

    pub fn apply(&mut self, params: PaymentMethodParams) -> core::result::Result<(), DeskError> {
        params.validate()?;
        self.name = params.name;
        self.network = params.network;
        self.wallet = params.wallet;
        Ok(())
    }

    /// Label recorded on investments, e.g. "USDT (TRC20)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_PAYMENT_LABEL_LEN;

    fn method() -> PaymentMethod {
        PaymentMethod {
            id: 0,
            name: String::new(),
            network: String::new(),
            wallet: String::new(),
            enabled: true,
            bump: 255,
        }
    }

    #[test]
    fn label_combines_name_and_network() {
        let mut m = method();
        m.apply(PaymentMethodParams {
            name: "USDT".to_string(),
            network: "TRC20".to_string(),
            wallet: "TXyz".to_string(),
        })
        .unwrap();
        assert_eq!(m.label(), "USDT (TRC20)");
    }

    #[test]
    fn longest_label_fits_investment_field() {
        let mut m = method();
        m.apply(PaymentMethodParams {
            name: "N".repeat(MAX_COIN_NAME_LEN),
            network: "W".repeat(MAX_NETWORK_LEN),
            wallet: "addr".to_string(),
        })
        .unwrap();
        assert_eq!(m.label().len(), MAX_PAYMENT_LABEL_LEN);
    }

    #[test]
    fn rejects_blank_or_oversized_fields() {
        let mut m = method();
        let blank_wallet = PaymentMethodParams {
            name: "BTC".to_string(),
            network: "Bitcoin".to_string(),
            wallet: String::new(),
        };
        assert!(matches!(m.apply(blank_wallet), Err(DeskError::InvalidText)));

        let long_name = PaymentMethodParams {
            name: "X".repeat(MAX_COIN_NAME_LEN + 1),
            network: "Bitcoin".to_string(),
            wallet: "bc1q".to_string(),
        };
        assert!(matches!(m.apply(long_name), Err(DeskError::InvalidText)));
    }
}
