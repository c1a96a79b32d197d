pub mod factory;
pub mod ledgers;
pub mod notify;
