//! Library side of the `nnviz` command-line driver.

pub mod logging;
pub mod summary;
