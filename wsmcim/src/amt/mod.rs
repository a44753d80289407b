//! Classes du schéma AMT

pub mod boot;

pub use boot::BootCapabilities;
