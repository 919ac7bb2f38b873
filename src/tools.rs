pub(crate) mod hashing;
pub(crate) mod hide_debug;
pub(crate) mod serde_decimal;
pub(crate) mod timing;
