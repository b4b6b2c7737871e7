mod adapter;
mod nesting;
mod property_roundtrip;
pub(crate) mod utils;
