use anchor_lang::prelude::*;
use custody::{accounts, native};

use crate::constants::STATE_SEED;
use crate::state::{VaultAddresses, VaultState};

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The wallet opening the vault; pays for both accounts
    #[account(mut)]
    pub user: Signer<'info>,

    /// CHECK: address is re-derived from `user` and the account is created here
    #[account(mut)]
    pub vault_state: UncheckedAccount<'info>,

    /// Lamport custody PDA derived from ["vault", user]
    #[account(mut)]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(&mut self) -> Result<()> {
        let user_key = self.user.key();

        let addresses = VaultAddresses::find(&user_key)?;
        addresses.check(self.vault_state.key, self.vault.key)?;

        let system_program = self.system_program.to_account_info();
        let user = self.user.to_account_info();
        let vault = self.vault.to_account_info();

        let bump = [addresses.state_bump];
        let signer_seeds: &[&[&[u8]]] = &[&[STATE_SEED, user_key.as_ref(), &bump]];
        accounts::create_program_account(
            &system_program,
            &user,
            &self.vault_state.to_account_info(),
            VaultState::LEN,
            &crate::ID,
            signer_seeds,
            &VaultState {
                owner: user_key,
                vault_bump: addresses.vault_bump,
                state_bump: addresses.state_bump,
            },
        )?;

        // The custody account only exists on the ledger once it is rent exempt
        let shortfall = native::rent_reserve(&vault)?.saturating_sub(vault.lamports());
        if shortfall > 0 {
            let reserve = native::rent_reserve(&user)?;
            native::transfer_native(&system_program, &user, &vault, shortfall, reserve, &[])?;
        }

        msg!("Vault {} opened for {}", vault.key(), user_key);
        Ok(())
    }
}

pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    ctx.accounts.initialize()
}
