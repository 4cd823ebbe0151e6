//! Cableway Inspection Common Library
//!
//! Form model, field classification and report assembly shared by the CLI
//! and the desktop front.

pub mod error;
pub mod export;
pub mod fields;
pub mod form;
pub mod images;
pub mod layout;

pub use error::{Error, Result};
pub use export::assembler::{assemble, review_date};
pub use export::document::{Align, Document, DrawOp, FontSpec, FontWeight, Page, Section};
pub use fields::{FieldDefinition, FieldGroup, Placement, FIELDS};
pub use form::FormSnapshot;
pub use images::ImageList;
