//! Program-derived addresses.
//!
//! Every address a state machine trusts is recomputed here from its namespace
//! and seed material and compared against the account the caller supplied.

use anchor_lang::prelude::*;

use crate::errors::CustodyError;

fn collect<'a>(namespace: &'a [u8], seeds: &[&'a [u8]], bump: Option<&'a [u8]>) -> Vec<&'a [u8]> {
    let mut all = Vec::with_capacity(seeds.len() + 2);
    all.push(namespace);
    all.extend_from_slice(seeds);
    if let Some(bump) = bump {
        all.push(bump);
    }
    all
}

/// Find the canonical address and bump for `namespace` + `seeds`.
///
/// Bumps are searched from 255 downward; the first off-curve result wins.
pub fn derive(namespace: &[u8], seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    let all = collect(namespace, seeds, None);
    Pubkey::try_find_program_address(&all, program_id)
        .ok_or_else(|| error!(CustodyError::DerivationExhausted))
}

/// Re-derive with a known bump and compare against `supplied`.
pub fn verify(
    namespace: &[u8],
    seeds: &[&[u8]],
    bump: u8,
    program_id: &Pubkey,
    supplied: &Pubkey,
) -> Result<()> {
    let bump = [bump];
    let all = collect(namespace, seeds, Some(&bump));
    let expected = Pubkey::create_program_address(&all, program_id)
        .map_err(|_| error!(CustodyError::WrongDerivation))?;
    require_keys_eq!(expected, *supplied, CustodyError::WrongDerivation);
    Ok(())
}
