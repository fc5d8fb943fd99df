//! Assorted utility functions (missing batteries).
mod std_ext;

pub(crate) mod fs;
pub(crate) mod process;

pub(crate) mod prelude {
    pub(crate) use super::std_ext::prelude::*;
}

pub(crate) type DynError = dyn std::error::Error + Send + Sync;
