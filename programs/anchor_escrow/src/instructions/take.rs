use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use custody::{
    accounts,
    token::{close_token_account, load_token_account, TokenTransfer},
};

use crate::constants::ESCROW_SEED;
use crate::state::Escrow;

#[derive(Accounts)]
pub struct Take<'info> {
    /// The taker who accepts the exchange terms
    #[account(mut)]
    pub taker: Signer<'info>,

    /// The original maker who created the escrow
    #[account(mut)]
    pub maker: SystemAccount<'info>,

    /// CHECK: loaded and re-derived from `maker` in `load_offer`, closed on success
    #[account(mut)]
    pub escrow: UncheckedAccount<'info>,

    /// Token A mint
    #[account(mint::token_program = token_program)]
    pub mint_a: Box<InterfaceAccount<'info, Mint>>,

    /// Token B mint
    #[account(mint::token_program = token_program)]
    pub mint_b: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: must be the escrow's associated token account for mint A; checked in `load_offer`
    #[account(mut)]
    pub vault: UncheckedAccount<'info>,

    /// Taker's associated token account for Token A (receives Token A)
    #[account(
        init_if_needed,
        payer = taker,
        associated_token::mint = mint_a,
        associated_token::authority = taker,
        associated_token::token_program = token_program,
    )]
    pub taker_ata_a: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Taker's associated token account for Token B (source of Token B)
    #[account(
        mut,
        associated_token::mint = mint_b,
        associated_token::authority = taker,
        associated_token::token_program = token_program,
    )]
    pub taker_ata_b: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Maker's associated token account for Token B (receives Token B)
    #[account(
        init_if_needed,
        payer = taker,
        associated_token::mint = mint_b,
        associated_token::authority = maker,
        associated_token::token_program = token_program,
    )]
    pub maker_ata_b: Box<InterfaceAccount<'info, TokenAccount>>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> Take<'info> {
    /// Load the open offer and check every account it names
    fn load_offer(&self) -> Result<Escrow> {
        let escrow: Escrow = accounts::load_program_account(&self.escrow, &crate::ID)?;
        escrow.verify_address(self.maker.key, self.escrow.key)?;
        escrow.check_mint_a(&self.mint_a.key())?;
        escrow.check_mint_b(&self.mint_b.key())?;
        escrow.verify_vault(self.escrow.key, self.token_program.key, self.vault.key)?;
        Ok(escrow)
    }

    /// Swap both legs, then close the vault and the escrow
    pub fn settle(&mut self) -> Result<()> {
        let escrow = self.load_offer()?;

        let token_program = self.token_program.to_account_info();
        let escrow_info = self.escrow.to_account_info();
        let vault = self.vault.to_account_info();
        let maker = self.maker.to_account_info();

        let deposit = load_token_account(&vault, token_program.key)?.amount;

        // Taker pays the maker
        let pay = TokenTransfer::prepare(
            &token_program,
            &self.mint_b,
            &self.taker_ata_b.to_account_info(),
            &self.maker_ata_b.to_account_info(),
            &self.taker.to_account_info(),
            escrow.receive,
        )?;
        // Escrow releases Token A to the taker
        let release = TokenTransfer::prepare(
            &token_program,
            &self.mint_a,
            &vault,
            &self.taker_ata_a.to_account_info(),
            &escrow_info,
            deposit,
        )?;

        let seed_bytes = escrow.seed.to_le_bytes();
        let bump = [escrow.bump];
        let signer_seeds: &[&[&[u8]]] =
            &[&[ESCROW_SEED, escrow.maker.as_ref(), &seed_bytes, &bump]];

        pay.execute(&[])?;
        release.execute(signer_seeds)?;

        close_token_account(&token_program, &vault, &maker, &escrow_info, signer_seeds)?;
        accounts::close_program_account(&escrow_info, &maker)?;

        msg!(
            "Escrow {} settled: taker {} paid {} and received {}",
            escrow_info.key(),
            self.taker.key(),
            escrow.receive,
            deposit
        );
        Ok(())
    }
}

/// Handler for the take instruction
pub fn handler(ctx: Context<Take>) -> Result<()> {
    ctx.accounts.settle()
}
