/// Namespace of the offer PDA `["escrow", maker, seed]`.
pub const ESCROW_SEED: &[u8] = b"escrow";
