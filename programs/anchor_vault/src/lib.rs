use anchor_lang::prelude::*;

pub mod constants;
pub mod instructions;
pub mod state;

use instructions::*;

pub use custody::CustodyError;

declare_id!("HEmqoVEwiZNWwRkzpe7aodCEFo8fGfMC2uv3Bto1Uy73");

#[program]
pub mod anchor_vault {
    use super::*;

    /// Open a vault: create `VaultState` and fund the custody PDA to rent exemption
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    /// Move `amount` lamports from the owner into the vault
    pub fn deposit(ctx: Context<Payment>, amount: u64) -> Result<()> {
        instructions::payment::deposit(ctx, amount)
    }

    /// Move `amount` lamports from the vault back to the owner
    ///
    /// The vault keeps its rent-exempt minimum; only the surplus is withdrawable.
    pub fn withdraw(ctx: Context<Payment>, amount: u64) -> Result<()> {
        instructions::payment::withdraw(ctx, amount)
    }

    /// Drain the vault to the owner and delete both accounts
    pub fn close_vault(ctx: Context<CloseVault>) -> Result<()> {
        instructions::close_vault::handler(ctx)
    }
}
