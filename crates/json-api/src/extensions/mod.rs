//! Extension traits

mod date_range;
mod depot;
mod result;

pub(crate) use date_range::DateParamExt as _;
pub(crate) use depot::{DepotAuthExt as _, DepotExt as _};
pub(crate) use result::ResultExt as _;
