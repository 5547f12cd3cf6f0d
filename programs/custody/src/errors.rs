use anchor_lang::prelude::*;

#[error_code]
pub enum CustodyError {
    #[msg("Invalid amount: amount must be greater than zero")]
    InvalidAmount,
    #[msg("Insufficient funds: balance too low for the requested transfer")]
    InsufficientFunds,
    #[msg("Overflow: destination balance would exceed u64")]
    Overflow,
    #[msg("Already initialized: account exists at the derived address")]
    AlreadyInitialized,
    #[msg("Wrong derivation: supplied address does not match the derived address")]
    WrongDerivation,
    #[msg("Unauthorized: signer does not match the required authority")]
    Unauthorized,
    #[msg("Mint mismatch: token account is bound to a different mint")]
    MintMismatch,
    #[msg("Not found: expected account is absent or closed")]
    NotFound,
    #[msg("Derivation exhausted: no off-curve bump for these seeds")]
    DerivationExhausted,
}
