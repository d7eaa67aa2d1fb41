//! Store layer - observable account state and the reload-on-mutation policy

pub mod account_store;
pub mod observable;

pub use account_store::AccountStore;
pub use observable::{Observable, Subscription};
