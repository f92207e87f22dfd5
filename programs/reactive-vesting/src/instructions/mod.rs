pub mod initialize_directory;
pub mod set_service;
pub mod initialize_vesting;
pub mod initialize_share_ledger;
pub mod initialize_price_feed;
pub mod push_price;
pub mod get_price;
pub mod initialize_policy;
pub mod check_upkeep;
pub mod perform_upkeep;
pub mod create_schedule;
pub mod claim;
pub mod quote_release;

pub use initialize_directory::*;
pub use set_service::*;
pub use initialize_vesting::*;
pub use initialize_share_ledger::*;
pub use initialize_price_feed::*;
pub use push_price::*;
pub use get_price::*;
pub use initialize_policy::*;
pub use check_upkeep::*;
pub use perform_upkeep::*;
pub use create_schedule::*;
pub use claim::*;
pub use quote_release::*;
