//! Report document definitions in the JSON layout pdfmake renders.
//!
//! Reports carry a title block, the generation date and a single table.
//! Rendering to PDF bytes happens in whatever consumes the definition.

pub mod document;
pub mod kinds;

pub use document::{DocumentDefinition, ReportBuilder, ReportError};
pub use kinds::ReportKind;
