#[allow(clippy::module_inception)]
mod convertible;

pub use convertible::*;
