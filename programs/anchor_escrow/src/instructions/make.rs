use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::{create_idempotent, AssociatedToken, Create},
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use custody::{accounts, token::transfer_token, CustodyError};

use crate::constants::ESCROW_SEED;
use crate::state::{validate_terms, Escrow};

#[derive(Accounts)]
pub struct Make<'info> {
    /// Opens the offer, pays both rent deposits and funds the vault with Token A
    #[account(mut)]
    pub maker: Signer<'info>,

    /// CHECK: compared with ["escrow", maker, seed] and created in `open_offer`
    #[account(mut)]
    pub escrow: UncheckedAccount<'info>,

    /// Token A mint, held in custody until the offer resolves
    #[account(mint::token_program = token_program)]
    pub mint_a: InterfaceAccount<'info, Mint>,

    /// Token B mint, what the maker asks for
    #[account(mint::token_program = token_program)]
    pub mint_b: InterfaceAccount<'info, Mint>,

    /// Source of the deposit
    #[account(
        mut,
        associated_token::mint = mint_a,
        associated_token::authority = maker,
        associated_token::token_program = token_program,
    )]
    pub maker_ata_a: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: must be the escrow's associated token account for mint A; created in `open_vault`
    #[account(mut)]
    pub vault: UncheckedAccount<'info>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> Make<'info> {
    /// Check the terms and every supplied address before anything is created
    fn check(&self, seed: u64, deposit: u64, receive: u64) -> Result<u8> {
        let bump = Escrow::check_new_address(self.maker.key, seed, self.escrow.key)?;
        require!(
            !accounts::is_live(&self.escrow, &crate::ID),
            CustodyError::AlreadyInitialized
        );
        validate_terms(deposit, receive)?;

        let vault = Escrow::vault_address(self.escrow.key, &self.mint_a.key(), self.token_program.key);
        require_keys_eq!(vault, self.vault.key(), CustodyError::WrongDerivation);

        require_gte!(self.maker_ata_a.amount, deposit, CustodyError::InsufficientFunds);
        Ok(bump)
    }

    fn open_offer(&self, seed: u64, receive: u64, bump: u8) -> Result<()> {
        let maker_key = self.maker.key();
        let seed_bytes = seed.to_le_bytes();
        let bump_bytes = [bump];
        let signer_seeds: &[&[&[u8]]] = &[&[ESCROW_SEED, maker_key.as_ref(), &seed_bytes, &bump_bytes]];

        accounts::create_program_account(
            &self.system_program.to_account_info(),
            &self.maker.to_account_info(),
            &self.escrow.to_account_info(),
            Escrow::LEN,
            &crate::ID,
            signer_seeds,
            &Escrow {
                seed,
                maker: maker_key,
                mint_a: self.mint_a.key(),
                mint_b: self.mint_b.key(),
                receive,
                bump,
            },
        )
    }

    /// Idempotent so an associated token account someone opened early for
    /// the escrow address does not block the offer
    fn open_vault(&self) -> Result<()> {
        let cpi_accounts = Create {
            payer: self.maker.to_account_info(),
            associated_token: self.vault.to_account_info(),
            authority: self.escrow.to_account_info(),
            mint: self.mint_a.to_account_info(),
            system_program: self.system_program.to_account_info(),
            token_program: self.token_program.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.associated_token_program.to_account_info(), cpi_accounts);

        create_idempotent(cpi_ctx)
    }

    pub fn make(&mut self, seed: u64, deposit: u64, receive: u64) -> Result<()> {
        let bump = self.check(seed, deposit, receive)?;

        self.open_offer(seed, receive, bump)?;
        self.open_vault()?;

        transfer_token(
            &self.token_program.to_account_info(),
            &self.mint_a,
            &self.maker_ata_a.to_account_info(),
            &self.vault.to_account_info(),
            deposit,
            &self.maker.to_account_info(),
            &[],
        )?;

        msg!(
            "Escrow {} opened: {} of {} for {} of {}",
            self.escrow.key(),
            deposit,
            self.mint_a.key(),
            receive,
            self.mint_b.key()
        );
        Ok(())
    }
}

pub fn handler(ctx: Context<Make>, seed: u64, deposit: u64, receive: u64) -> Result<()> {
    ctx.accounts.make(seed, deposit, receive)
}
