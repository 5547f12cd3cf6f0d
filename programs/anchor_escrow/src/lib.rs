use anchor_lang::prelude::*;

pub mod constants;
pub mod instructions;
pub mod state;

use instructions::*;

pub use custody::CustodyError;

declare_id!("HqnyaLuWCkBbQwcLN62TGWdU7CuMt1uwopAiwvQJAPSL");

#[program]
pub mod anchor_escrow {
    use super::*;

    /// Create a new escrow: maker deposits Token A and sets exchange terms
    pub fn make(ctx: Context<Make>, seed: u64, deposit: u64, receive: u64) -> Result<()> {
        instructions::make::handler(ctx, seed, deposit, receive)
    }

    /// Accept the escrow: taker sends Token B, receives Token A
    pub fn take(ctx: Context<Take>) -> Result<()> {
        instructions::take::handler(ctx)
    }

    /// Refund the escrow: maker cancels and reclaims Token A
    pub fn refund(ctx: Context<Refund>) -> Result<()> {
        instructions::refund::handler(ctx)
    }
}
