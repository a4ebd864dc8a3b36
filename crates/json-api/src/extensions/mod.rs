//! Extension traits used by the handlers to turn incidental failures into 500s.

mod depot;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
