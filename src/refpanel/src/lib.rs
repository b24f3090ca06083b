//! Immutable reference panel shared by every [`threader::Threader`] in an
//! inference run.

mod error;
mod panel;

pub use error::RefPanelError;
pub use panel::ReferencePanel;
