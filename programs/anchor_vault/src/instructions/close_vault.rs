use anchor_lang::prelude::*;
use custody::{accounts, native};

use crate::constants::VAULT_SEED;
use crate::state::VaultState;

#[derive(Accounts)]
pub struct CloseVault<'info> {
    /// Vault owner; receives the balance and both rent deposits
    #[account(mut)]
    pub user: Signer<'info>,

    /// CHECK: loaded, re-derived and closed in `close_vault`
    #[account(mut)]
    pub vault_state: UncheckedAccount<'info>,

    /// Lamport custody PDA derived from ["vault", user]
    #[account(mut)]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> CloseVault<'info> {
    pub fn close_vault(&mut self) -> Result<()> {
        let state: VaultState = accounts::load_program_account(&self.vault_state, &crate::ID)?;
        state.verify_addresses(self.vault_state.key, self.vault.key)?;
        state.authorize(self.user.key)?;

        let user = self.user.to_account_info();
        let vault = self.vault.to_account_info();
        let balance = vault.lamports();

        if balance > 0 {
            let user_key = self.user.key();
            let bump = [state.vault_bump];
            let signer_seeds: &[&[&[u8]]] = &[&[VAULT_SEED, user_key.as_ref(), &bump]];

            // Draining to zero lets the runtime drop the custody account
            native::transfer_native(
                &self.system_program.to_account_info(),
                &vault,
                &user,
                balance,
                0,
                signer_seeds,
            )?;
        }

        accounts::close_program_account(&self.vault_state.to_account_info(), &user)?;

        msg!("Closed vault {}, returned {} lamports", vault.key(), balance);
        Ok(())
    }
}

pub fn handler(ctx: Context<CloseVault>) -> Result<()> {
    ctx.accounts.close_vault()
}
