pub mod error;
pub mod json;
pub mod patch;
pub mod transform;

#[cfg(test)]
pub(crate) mod test_utils;
