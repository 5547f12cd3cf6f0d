use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address_with_program_id;
use custody::{derivation, CustodyError};

use crate::constants::ESCROW_SEED;

/// Escrow account that stores all the exchange terms
#[account]
#[derive(InitSpace)]
pub struct Escrow {
    /// Client-chosen seed so one maker can run several offers
    pub seed: u64,
    /// The maker's wallet address (creator of the escrow)
    pub maker: Pubkey,
    /// Token A mint address (the token maker deposits)
    pub mint_a: Pubkey,
    /// Token B mint address (the token maker wants to receive)
    pub mint_b: Pubkey,
    /// Amount of Token B the maker wants to receive
    pub receive: u64,
    /// Canonical bump of the escrow PDA
    pub bump: u8,
}

impl Escrow {
    pub const LEN: usize = 8 + Self::INIT_SPACE;

    pub fn find_address(maker: &Pubkey, seed: u64) -> Result<(Pubkey, u8)> {
        derivation::derive(ESCROW_SEED, &[maker.as_ref(), &seed.to_le_bytes()], &crate::ID)
    }

    /// Canonical bump of a new offer, once `supplied` is confirmed to be its address.
    pub fn check_new_address(maker: &Pubkey, seed: u64, supplied: &Pubkey) -> Result<u8> {
        let (address, bump) = Self::find_address(maker, seed)?;
        require_keys_eq!(address, *supplied, CustodyError::WrongDerivation);
        Ok(bump)
    }

    /// Associated token account of the escrow PDA for `mint`: the vault.
    pub fn vault_address(escrow: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
        get_associated_token_address_with_program_id(escrow, mint, token_program)
    }

    /// Re-derive the offer address from `maker` and the stored seed and bump.
    pub fn verify_address(&self, maker: &Pubkey, supplied: &Pubkey) -> Result<()> {
        derivation::verify(
            ESCROW_SEED,
            &[maker.as_ref(), &self.seed.to_le_bytes()],
            self.bump,
            &crate::ID,
            supplied,
        )
    }

    pub fn verify_vault(&self, escrow: &Pubkey, token_program: &Pubkey, supplied: &Pubkey) -> Result<()> {
        require_keys_eq!(
            Self::vault_address(escrow, &self.mint_a, token_program),
            *supplied,
            CustodyError::WrongDerivation
        );
        Ok(())
    }

    pub fn authorize_refund(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(self.maker, *caller, CustodyError::Unauthorized);
        Ok(())
    }

    pub fn check_mint_a(&self, mint_a: &Pubkey) -> Result<()> {
        require_keys_eq!(self.mint_a, *mint_a, CustodyError::MintMismatch);
        Ok(())
    }

    pub fn check_mint_b(&self, mint_b: &Pubkey) -> Result<()> {
        require_keys_eq!(self.mint_b, *mint_b, CustodyError::MintMismatch);
        Ok(())
    }
}

/// Both sides of an offer must be non-zero.
pub fn validate_terms(deposit: u64, receive: u64) -> Result<()> {
    require_gt!(deposit, 0, CustodyError::InvalidAmount);
    require_gt!(receive, 0, CustodyError::InvalidAmount);
    Ok(())
}
