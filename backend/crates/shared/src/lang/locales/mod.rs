//! Built-in catalogs

mod en_us;
mod pt_br;

pub use en_us::EN_US;
pub use pt_br::PT_BR;
