//! Report export core shared by the CLI and the desktop front.

pub mod assembler;
pub mod document;
