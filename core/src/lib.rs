//! LiveBoot Core Library
//!
//! Boot configuration resolution and boot-chain logic for the LiveBoot UEFI
//! helper: distribution catalog, configuration parsing, boot option
//! resolution, artifact validation and the launcher that hands control to
//! the second-stage loader.
//!
//! Firmware access goes through the [`boot::BootVolume`],
//! [`boot::VariableStore`] and [`boot::ImagePlatform`] traits, so all of it
//! runs and is tested on the host.

#![cfg_attr(not(test), no_std)]
#![allow(clippy::new_without_default)]

extern crate alloc;

pub mod boot;
pub mod config;
pub mod distro;
pub mod error;
pub mod layout;
pub mod logger;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;

pub use boot::{prepare, BootChainLauncher, BootOption, PreparedBoot};
pub use error::{BootError, Result};
pub use layout::BootLayout;
