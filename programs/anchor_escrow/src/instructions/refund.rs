use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use custody::{
    accounts,
    token::{close_token_account, load_token_account, transfer_token},
};

use crate::constants::ESCROW_SEED;
use crate::state::Escrow;

#[derive(Accounts)]
pub struct Refund<'info> {
    /// The maker who originally created the escrow (can refund)
    #[account(mut)]
    pub maker: Signer<'info>,

    /// CHECK: loaded, authorized against `maker` and re-derived in `load_offer`
    #[account(mut)]
    pub escrow: UncheckedAccount<'info>,

    /// Token A mint
    #[account(mint::token_program = token_program)]
    pub mint_a: InterfaceAccount<'info, Mint>,

    /// CHECK: must be the escrow's associated token account for mint A; checked in `load_offer`
    #[account(mut)]
    pub vault: UncheckedAccount<'info>,

    /// Maker's associated token account for Token A (receives refund)
    #[account(
        init_if_needed,
        payer = maker,
        associated_token::mint = mint_a,
        associated_token::authority = maker,
        associated_token::token_program = token_program,
    )]
    pub maker_ata_a: InterfaceAccount<'info, TokenAccount>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> Refund<'info> {
    fn load_offer(&self) -> Result<Escrow> {
        let escrow: Escrow = accounts::load_program_account(&self.escrow, &crate::ID)?;
        escrow.authorize_refund(self.maker.key)?;
        escrow.verify_address(self.maker.key, self.escrow.key)?;
        escrow.check_mint_a(&self.mint_a.key())?;
        escrow.verify_vault(self.escrow.key, self.token_program.key, self.vault.key)?;
        Ok(escrow)
    }

    /// Withdraw all Token A from vault back to maker and close the vault
    pub fn refund_and_close_vault(&mut self) -> Result<()> {
        let escrow = self.load_offer()?;

        let token_program = self.token_program.to_account_info();
        let escrow_info = self.escrow.to_account_info();
        let vault = self.vault.to_account_info();
        let maker = self.maker.to_account_info();

        let deposit = load_token_account(&vault, token_program.key)?.amount;

        let seed_bytes = escrow.seed.to_le_bytes();
        let bump = [escrow.bump];
        let signer_seeds: &[&[&[u8]]] =
            &[&[ESCROW_SEED, escrow.maker.as_ref(), &seed_bytes, &bump]];

        transfer_token(
            &token_program,
            &self.mint_a,
            &vault,
            &self.maker_ata_a.to_account_info(),
            deposit,
            &escrow_info,
            signer_seeds,
        )?;

        close_token_account(&token_program, &vault, &maker, &escrow_info, signer_seeds)?;
        accounts::close_program_account(&escrow_info, &maker)?;

        msg!("Escrow {} refunded {} to maker {}", escrow_info.key(), deposit, maker.key());
        Ok(())
    }
}

/// Handler for the refund instruction
pub fn handler(ctx: Context<Refund>) -> Result<()> {
    ctx.accounts.refund_and_close_vault()
}
