//! Fungible-token custody.
//!
//! Transfers are split into [`TokenTransfer::prepare`], which loads both token
//! accounts and runs every check, and [`TokenTransfer::execute`], which issues
//! the `transfer_checked` CPI. Instructions that move two legs prepare both
//! before executing either.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    close_account, transfer_checked, CloseAccount, Mint, TokenAccount, TransferChecked,
};

use crate::errors::CustodyError;

/// The parts of a token account the custody checks look at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenBalance {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub delegate: Option<Pubkey>,
    pub delegated_amount: u64,
    pub amount: u64,
}

impl From<&TokenAccount> for TokenBalance {
    fn from(account: &TokenAccount) -> Self {
        Self {
            mint: account.mint,
            owner: account.owner,
            delegate: account.delegate.into(),
            delegated_amount: account.delegated_amount,
            amount: account.amount,
        }
    }
}

impl TokenBalance {
    /// Whether `authority` may move `amount` out of this account.
    pub fn authorizes(&self, authority: &Pubkey, amount: u64) -> bool {
        self.owner == *authority
            || (self.delegate == Some(*authority) && self.delegated_amount >= amount)
    }
}

/// Deserialize a token account owned by `token_program`.
pub fn load_token_account(info: &AccountInfo, token_program: &Pubkey) -> Result<TokenAccount> {
    if info.data_is_empty() || info.owner != token_program {
        return err!(CustodyError::NotFound);
    }
    let data = info.try_borrow_data()?;
    TokenAccount::try_deserialize(&mut &data[..])
}

/// Check a transfer of `amount` units of `mint` from `from` to `to`.
pub fn check_token_transfer(
    mint: &Pubkey,
    from: &TokenBalance,
    to: &TokenBalance,
    authority: &Pubkey,
    amount: u64,
) -> Result<()> {
    require_keys_eq!(from.mint, *mint, CustodyError::MintMismatch);
    require_keys_eq!(to.mint, *mint, CustodyError::MintMismatch);
    require!(from.authorizes(authority, amount), CustodyError::Unauthorized);
    require_gte!(from.amount, amount, CustodyError::InsufficientFunds);
    to.amount.checked_add(amount).ok_or(CustodyError::Overflow)?;
    Ok(())
}

/// A validated, not yet executed token transfer.
pub struct TokenTransfer<'info> {
    token_program: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    decimals: u8,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    amount: u64,
}

impl<'info> TokenTransfer<'info> {
    pub fn prepare(
        token_program: &AccountInfo<'info>,
        mint: &InterfaceAccount<'info, Mint>,
        from: &AccountInfo<'info>,
        to: &AccountInfo<'info>,
        authority: &AccountInfo<'info>,
        amount: u64,
    ) -> Result<Self> {
        let source = load_token_account(from, token_program.key)?;
        let destination = load_token_account(to, token_program.key)?;

        check_token_transfer(
            &mint.key(),
            &TokenBalance::from(&source),
            &TokenBalance::from(&destination),
            authority.key,
            amount,
        )?;

        Ok(Self {
            token_program: token_program.clone(),
            mint: mint.to_account_info(),
            decimals: mint.decimals,
            from: from.clone(),
            to: to.clone(),
            authority: authority.clone(),
            amount,
        })
    }

    /// Issue the CPI. Program-owned sources sign with `signer_seeds`.
    pub fn execute(self, signer_seeds: &[&[&[u8]]]) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.from,
            mint: self.mint,
            to: self.to,
            authority: self.authority,
        };
        let cpi_ctx = CpiContext::new_with_signer(self.token_program, cpi_accounts, signer_seeds);

        transfer_checked(cpi_ctx, self.amount, self.decimals)
    }
}

/// Single-leg transfer: prepare and execute in one call.
pub fn transfer_token<'info>(
    token_program: &AccountInfo<'info>,
    mint: &InterfaceAccount<'info, Mint>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    amount: u64,
    authority: &AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    TokenTransfer::prepare(token_program, mint, from, to, authority, amount)?.execute(signer_seeds)
}

/// Close an emptied token account, sending its rent to `destination`.
pub fn close_token_account<'info>(
    token_program: &AccountInfo<'info>,
    account: &AccountInfo<'info>,
    destination: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let cpi_accounts = CloseAccount {
        account: account.clone(),
        destination: destination.clone(),
        authority: authority.clone(),
    };
    let cpi_ctx = CpiContext::new_with_signer(token_program.clone(), cpi_accounts, signer_seeds);

    close_account(cpi_ctx)
}
