#[cfg(feature = "serde")]
pub mod api;
pub mod biometrics;
pub mod estimate;
