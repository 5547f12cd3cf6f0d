//! Native (lamport) custody.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::errors::CustodyError;

/// Lamports `info` must keep to stay rent exempt at its current size.
pub fn rent_reserve(info: &AccountInfo) -> Result<u64> {
    Ok(Rent::get()?.minimum_balance(info.data_len()))
}

/// Check that `amount` lamports can leave an account holding `from_balance`
/// while it keeps `reserve`, and land in one holding `to_balance`.
pub fn check_native_transfer(
    from_balance: u64,
    reserve: u64,
    to_balance: u64,
    amount: u64,
) -> Result<()> {
    let spendable = from_balance.saturating_sub(reserve);
    require_gte!(spendable, amount, CustodyError::InsufficientFunds);
    to_balance
        .checked_add(amount)
        .ok_or(CustodyError::Overflow)?;
    Ok(())
}

/// Move `amount` lamports from `from` to `to` through the system program.
///
/// `from` keeps at least `reserve` lamports. Program-owned sources pass
/// their derivation seeds in `signer_seeds`; wallets pass `&[]`.
pub fn transfer_native<'info>(
    system_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    amount: u64,
    reserve: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    check_native_transfer(from.lamports(), reserve, to.lamports(), amount)?;

    let cpi_accounts = Transfer {
        from: from.clone(),
        to: to.clone(),
    };
    let cpi_ctx = CpiContext::new_with_signer(system_program.clone(), cpi_accounts, signer_seeds);

    transfer(cpi_ctx, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    #[test]
    fn allows_exact_spendable_balance() {
        assert!(check_native_transfer(1_000, 0, 0, 1_000).is_ok());
        assert!(check_native_transfer(1_500, 500, 0, 1_000).is_ok());
    }

    #[test]
    fn rejects_more_than_balance() {
        assert_eq!(
            check_native_transfer(1_000_000_000, 0, 0, 2_000_000_000).unwrap_err(),
            Error::from(CustodyError::InsufficientFunds)
        );
    }

    #[test]
    fn reserve_is_not_spendable() {
        assert_eq!(
            check_native_transfer(1_500, 501, 0, 1_000).unwrap_err(),
            Error::from(CustodyError::InsufficientFunds)
        );
        // A balance below the reserve leaves nothing to spend.
        assert_eq!(
            check_native_transfer(100, 890_880, 0, 1).unwrap_err(),
            Error::from(CustodyError::InsufficientFunds)
        );
    }

    #[test]
    fn rejects_destination_overflow() {
        assert_eq!(
            check_native_transfer(10, 0, u64::MAX - 5, 6).unwrap_err(),
            Error::from(CustodyError::Overflow)
        );
        assert!(check_native_transfer(10, 0, u64::MAX - 5, 5).is_ok());
    }
}
