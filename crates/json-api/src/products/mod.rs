//! Products

pub(crate) mod errors;
mod handlers;
pub(crate) mod requests;

pub(crate) use handlers::*;
