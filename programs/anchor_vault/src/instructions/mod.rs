pub mod close_vault;
pub mod initialize;
pub mod payment;

pub use close_vault::*;
pub use initialize::*;
pub use payment::*;
