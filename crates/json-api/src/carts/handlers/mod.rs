//! Cart Handlers

pub(crate) mod add;
pub(crate) mod decrement;
pub(crate) mod details;
pub(crate) mod increment;
pub(crate) mod remove;
pub(crate) mod total;
