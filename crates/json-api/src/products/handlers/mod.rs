//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod replace;
pub(crate) mod update;

#[cfg(test)]
mod flows;
