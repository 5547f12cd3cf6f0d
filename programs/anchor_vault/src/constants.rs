/// Namespace of the `VaultState` metadata PDA.
pub const STATE_SEED: &[u8] = b"state";

/// Namespace of the lamport custody PDA.
pub const VAULT_SEED: &[u8] = b"vault";
