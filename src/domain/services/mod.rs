pub mod calendar;
pub mod conflict;
pub mod temporal;
pub mod workflow;
