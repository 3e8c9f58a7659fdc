mod constants;
mod convertible;
mod mapper;
mod stream;
mod util;
mod value;

pub use constants::*;
pub use convertible::*;
pub use mapper::*;
pub use stream::*;
pub use util::*;
pub use value::*;
