//! Lifecycle of program-owned metadata accounts.

use std::io::Cursor;

use anchor_lang::prelude::*;
use anchor_lang::system_program::{
    allocate, assign, create_account, Allocate, Assign, CreateAccount,
};

use crate::errors::CustodyError;
use crate::native;

/// Whether `info` currently holds an account owned by `program_id`.
pub fn is_live(info: &AccountInfo, program_id: &Pubkey) -> bool {
    info.owner == program_id && !info.data_is_empty()
}

/// Deserialize a `T` stored in a program-owned account.
///
/// Absent, closed and foreign accounts all report `NotFound`.
pub fn load_program_account<T: AccountDeserialize>(
    info: &AccountInfo,
    program_id: &Pubkey,
) -> Result<T> {
    if !is_live(info, program_id) {
        return err!(CustodyError::NotFound);
    }
    let data = info.try_borrow_data()?;
    T::try_deserialize(&mut &data[..])
}

/// Create a rent-exempt account of `space` bytes at a program-derived address
/// and write `value` into it.
///
/// An address that already holds lamports (anyone can send to a PDA) is
/// topped up to rent exemption, then allocated and assigned in place.
pub fn create_program_account<'info, T: AccountSerialize>(
    system_program: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    target: &AccountInfo<'info>,
    space: usize,
    program_id: &Pubkey,
    signer_seeds: &[&[&[u8]]],
    value: &T,
) -> Result<()> {
    if is_live(target, program_id) {
        return err!(CustodyError::AlreadyInitialized);
    }
    require_keys_eq!(*target.owner, System::id(), CustodyError::AlreadyInitialized);
    require!(target.data_is_empty(), CustodyError::AlreadyInitialized);

    let required = Rent::get()?.minimum_balance(space);
    let shortfall = required.saturating_sub(target.lamports());
    let payer_reserve = native::rent_reserve(payer)?;
    native::check_native_transfer(payer.lamports(), payer_reserve, target.lamports(), shortfall)?;

    if target.lamports() == 0 {
        let cpi_accounts = CreateAccount {
            from: payer.clone(),
            to: target.clone(),
        };
        let cpi_ctx =
            CpiContext::new_with_signer(system_program.clone(), cpi_accounts, signer_seeds);
        create_account(cpi_ctx, required, space as u64, program_id)?;
    } else {
        if shortfall > 0 {
            native::transfer_native(system_program, payer, target, shortfall, payer_reserve, &[])?;
        }

        let cpi_accounts = Allocate {
            account_to_allocate: target.clone(),
        };
        let cpi_ctx =
            CpiContext::new_with_signer(system_program.clone(), cpi_accounts, signer_seeds);
        allocate(cpi_ctx, space as u64)?;

        let cpi_accounts = Assign {
            account_to_assign: target.clone(),
        };
        let cpi_ctx =
            CpiContext::new_with_signer(system_program.clone(), cpi_accounts, signer_seeds);
        assign(cpi_ctx, program_id)?;
    }

    let mut data = target.try_borrow_mut_data()?;
    let mut writer = Cursor::new(&mut data[..]);
    value.try_serialize(&mut writer)
}

/// Close a program-owned account: move every lamport to `destination`,
/// zero its data and hand it back to the system program.
pub fn close_program_account<'info>(
    info: &AccountInfo<'info>,
    destination: &AccountInfo<'info>,
) -> Result<()> {
    let lamports = info.lamports();
    let credited = destination
        .lamports()
        .checked_add(lamports)
        .ok_or(CustodyError::Overflow)?;

    **destination.try_borrow_mut_lamports()? = credited;
    **info.try_borrow_mut_lamports()? = 0;

    info.try_borrow_mut_data()?.fill(0);
    info.assign(&System::id());
    Ok(())
}
