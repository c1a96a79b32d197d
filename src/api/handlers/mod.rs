pub mod health;
pub mod participant;
pub mod schedule;
pub mod session;
