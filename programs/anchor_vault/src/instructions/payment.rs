use anchor_lang::prelude::*;
use custody::{accounts, native, CustodyError};

use crate::constants::VAULT_SEED;
use crate::state::VaultState;

#[derive(Accounts)]
pub struct Payment<'info> {
    /// Vault owner
    #[account(mut)]
    pub user: Signer<'info>,

    /// Lamport custody PDA derived from ["vault", user]
    #[account(mut)]
    pub vault: SystemAccount<'info>,

    /// CHECK: loaded and re-derived from its stored bump in `load_state`
    pub vault_state: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Payment<'info> {
    fn load_state(&self) -> Result<VaultState> {
        let state: VaultState = accounts::load_program_account(&self.vault_state, &crate::ID)?;
        state.verify_addresses(self.vault_state.key, self.vault.key)?;
        state.authorize(self.user.key)?;
        Ok(state)
    }

    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        self.load_state()?;
        require_gt!(amount, 0, CustodyError::InvalidAmount);

        let user = self.user.to_account_info();
        let reserve = native::rent_reserve(&user)?;
        native::transfer_native(
            &self.system_program.to_account_info(),
            &user,
            &self.vault.to_account_info(),
            amount,
            reserve,
            &[],
        )?;

        msg!("Deposited {} lamports into vault {}", amount, self.vault.key());
        Ok(())
    }

    pub fn withdraw(&mut self, amount: u64) -> Result<()> {
        let state = self.load_state()?;
        require_gt!(amount, 0, CustodyError::InvalidAmount);

        let vault = self.vault.to_account_info();
        // The rent-exempt minimum stays behind until the vault is closed
        let reserve = native::rent_reserve(&vault)?;

        let user_key = self.user.key();
        let bump = [state.vault_bump];
        let signer_seeds: &[&[&[u8]]] = &[&[VAULT_SEED, user_key.as_ref(), &bump]];

        native::transfer_native(
            &self.system_program.to_account_info(),
            &vault,
            &self.user.to_account_info(),
            amount,
            reserve,
            signer_seeds,
        )?;

        msg!("Withdrew {} lamports from vault {}", amount, vault.key());
        Ok(())
    }
}

pub fn deposit(ctx: Context<Payment>, amount: u64) -> Result<()> {
    ctx.accounts.deposit(amount)
}

pub fn withdraw(ctx: Context<Payment>, amount: u64) -> Result<()> {
    ctx.accounts.withdraw(amount)
}
