//! Shared helpers for the poidb integration tests under `tests/`.

pub mod test_util;
