pub mod directory;
pub mod policy;
pub mod price_feed;
pub mod schedule;
pub mod share_ledger;
pub mod vesting_core;

pub use directory::*;
pub use policy::*;
pub use price_feed::*;
pub use schedule::*;
pub use share_ledger::*;
pub use vesting_core::*;
