pub mod cos;
pub mod local;
pub mod provider;
