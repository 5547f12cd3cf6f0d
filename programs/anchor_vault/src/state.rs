use anchor_lang::prelude::*;
use custody::{derivation, CustodyError};

use crate::constants::{STATE_SEED, VAULT_SEED};

/// Metadata paired with a user's lamport vault.
#[account]
#[derive(InitSpace)]
pub struct VaultState {
    /// Wallet that created the vault; the only signer allowed to move funds
    pub owner: Pubkey,
    /// Bump of the custody PDA `["vault", owner]`
    pub vault_bump: u8,
    /// Bump of this account's PDA `["state", owner]`
    pub state_bump: u8,
}

/// Canonical addresses of a user's vault pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VaultAddresses {
    pub state: Pubkey,
    pub state_bump: u8,
    pub vault: Pubkey,
    pub vault_bump: u8,
}

impl VaultAddresses {
    pub fn find(user: &Pubkey) -> Result<Self> {
        let (state, state_bump) = derivation::derive(STATE_SEED, &[user.as_ref()], &crate::ID)?;
        let (vault, vault_bump) = derivation::derive(VAULT_SEED, &[user.as_ref()], &crate::ID)?;
        Ok(Self {
            state,
            state_bump,
            vault,
            vault_bump,
        })
    }

    /// Compare the supplied accounts against the canonical pair.
    pub fn check(&self, state: &Pubkey, vault: &Pubkey) -> Result<()> {
        require_keys_eq!(self.state, *state, CustodyError::WrongDerivation);
        require_keys_eq!(self.vault, *vault, CustodyError::WrongDerivation);
        Ok(())
    }
}

impl VaultState {
    pub const LEN: usize = 8 + Self::INIT_SPACE;

    /// Re-derive both PDAs from the stored bumps and compare them with the
    /// accounts the caller supplied.
    pub fn verify_addresses(&self, state: &Pubkey, vault: &Pubkey) -> Result<()> {
        derivation::verify(STATE_SEED, &[self.owner.as_ref()], self.state_bump, &crate::ID, state)?;
        derivation::verify(VAULT_SEED, &[self.owner.as_ref()], self.vault_bump, &crate::ID, vault)
    }

    pub fn authorize(&self, user: &Pubkey) -> Result<()> {
        require_keys_eq!(self.owner, *user, CustodyError::Unauthorized);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn state_for(user: Pubkey) -> (VaultState, VaultAddresses) {
        let addresses = VaultAddresses::find(&user).unwrap();
        let state = VaultState {
            owner: user,
            vault_bump: addresses.vault_bump,
            state_bump: addresses.state_bump,
        };
        (state, addresses)
    }

    #[test]
    fn account_size() {
        assert_eq!(VaultState::LEN, 8 + 32 + 1 + 1);
    }

    #[test]
    fn addresses_match_client_derivation() {
        let user = Pubkey::new_unique();
        let addresses = VaultAddresses::find(&user).unwrap();
        let (state, state_bump) =
            Pubkey::find_program_address(&[b"state", user.as_ref()], &crate::ID);
        let (vault, vault_bump) =
            Pubkey::find_program_address(&[b"vault", user.as_ref()], &crate::ID);

        assert_eq!(addresses.state, state);
        assert_eq!(addresses.state_bump, state_bump);
        assert_eq!(addresses.vault, vault);
        assert_eq!(addresses.vault_bump, vault_bump);
        assert_ne!(addresses.state, addresses.vault);
    }

    #[test]
    fn initialize_rejects_state_under_other_namespace() {
        let user = Pubkey::new_unique();
        let addresses = VaultAddresses::find(&user).unwrap();
        let (hello, _) = Pubkey::find_program_address(&[b"hello", user.as_ref()], &crate::ID);

        assert!(addresses.check(&addresses.state, &addresses.vault).is_ok());
        assert_eq!(
            addresses.check(&hello, &addresses.vault).unwrap_err(),
            Error::from(CustodyError::WrongDerivation)
        );
        assert_eq!(
            addresses.check(&addresses.state, &hello).unwrap_err(),
            Error::from(CustodyError::WrongDerivation)
        );
    }

    #[test]
    fn stored_bumps_verify_supplied_accounts() {
        let (state, addresses) = state_for(Pubkey::new_unique());
        assert!(state.verify_addresses(&addresses.state, &addresses.vault).is_ok());
    }

    #[test]
    fn swapped_or_foreign_accounts_fail_derivation() {
        let (state, addresses) = state_for(Pubkey::new_unique());
        let wrong = Error::from(CustodyError::WrongDerivation);

        assert_eq!(
            state.verify_addresses(&addresses.vault, &addresses.state).unwrap_err(),
            wrong
        );

        let (_, other) = state_for(Pubkey::new_unique());
        assert_eq!(state.verify_addresses(&addresses.state, &other.vault).unwrap_err(), wrong);
    }

    #[test]
    fn only_owner_is_authorized() {
        let user = Pubkey::new_unique();
        let (state, _) = state_for(user);
        assert!(state.authorize(&user).is_ok());
        assert_eq!(
            state.authorize(&Pubkey::new_unique()).unwrap_err(),
            Error::from(CustodyError::Unauthorized)
        );
    }
}
