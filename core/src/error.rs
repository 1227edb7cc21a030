//! Boot chain errors
//!
//! One error type for the whole pipeline. `Display` produces the one-line
//! message shown to the operator.

use alloc::string::String;
use core::fmt;

use crate::status;

pub type Result<T> = core::result::Result<T, BootError>;

#[derive(Clone, PartialEq, Eq)]
pub enum BootError {
    /// A mandatory file is absent from the boot volume.
    MissingArtifact(String),
    /// The configuration file could not be read or held no entries.
    ConfigurationUnreadable,
    /// `family` named a distribution the catalog does not know.
    UnsupportedDistribution(String),
    /// Resolution finished without both a kernel and an initrd path.
    UnresolvedBootTarget,
    /// Informational: a configuration key the resolver ignores.
    UnrecognizedOption(String),
    /// The firmware refused to store a boot variable.
    VariableWrite { name: &'static str, status: usize },
    /// LoadImage failed for the second-stage loader.
    LoadFailed(usize),
    /// StartImage failed, or the second stage handed control back.
    StartFailed(usize),
}

impl BootError {
    /// Everything except unrecognized-option notices ends the current attempt.
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::UnrecognizedOption(_))
    }

    /// Errors raised before the menu is shown keep the menu from opening.
    pub const fn blocks_menu(&self) -> bool {
        matches!(
            self,
            Self::MissingArtifact(_)
                | Self::ConfigurationUnreadable
                | Self::UnsupportedDistribution(_)
                | Self::UnresolvedBootTarget
        )
    }

    /// Status handed back to the firmware when this error ends the program.
    ///
    /// Fatal errors always map to an error status; a platform status without
    /// the error bit (an image that returned `EFI_SUCCESS`) becomes
    /// `EFI_LOAD_ERROR`.
    pub const fn exit_status(&self) -> usize {
        match self {
            Self::LoadFailed(code)
            | Self::StartFailed(code)
            | Self::VariableWrite { status: code, .. }
                if status::is_error(*code) =>
            {
                *code
            }
            Self::UnrecognizedOption(_) => status::EFI_SUCCESS,
            _ => status::EFI_LOAD_ERROR,
        }
    }
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArtifact(path) => write!(f, "Error: can't find {}", path),
            Self::ConfigurationUnreadable => f.write_str("Error: can't read the boot configuration file"),
            Self::UnsupportedDistribution(name) => {
                write!(f, "Error: unsupported distribution family \"{}\"", name)
            }
            Self::UnresolvedBootTarget => {
                f.write_str("Error: configuration does not name both a kernel and an initrd")
            }
            Self::UnrecognizedOption(key) => write!(f, "Unrecognized option: {}", key),
            Self::VariableWrite { name, status } => write!(
                f,
                "Error: can't store variable {} ({})",
                name,
                status::describe(*status)
            ),
            Self::LoadFailed(status) => write!(
                f,
                "Error: can't load the boot loader image ({})",
                status::describe(*status)
            ),
            Self::StartFailed(code) if !status::is_error(*code) => {
                f.write_str("Error: the boot loader image returned control")
            }
            Self::StartFailed(status) => write!(
                f,
                "Error: can't start the boot loader image ({})",
                status::describe(*status)
            ),
        }
    }
}

impl fmt::Debug for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArtifact(path) => f.debug_tuple("MissingArtifact").field(path).finish(),
            Self::ConfigurationUnreadable => f.write_str("ConfigurationUnreadable"),
            Self::UnsupportedDistribution(name) => {
                f.debug_tuple("UnsupportedDistribution").field(name).finish()
            }
            Self::UnresolvedBootTarget => f.write_str("UnresolvedBootTarget"),
            Self::UnrecognizedOption(key) => f.debug_tuple("UnrecognizedOption").field(key).finish(),
            Self::VariableWrite { name, status } => f
                .debug_struct("VariableWrite")
                .field("name", name)
                .field("status", &format_args!("{:#x}", status))
                .finish(),
            Self::LoadFailed(status) => f
                .debug_tuple("LoadFailed")
                .field(&format_args!("{:#x}", status))
                .finish(),
            Self::StartFailed(status) => f
                .debug_tuple("StartFailed")
                .field(&format_args!("{:#x}", status))
                .finish(),
        }
    }
}
