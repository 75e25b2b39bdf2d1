//! PDF rendering for generated storybooks.
//!
//! [`PdfRenderer`] writes one PDF page per illustrated storybook page, sized
//! to the illustration, with the page text laid over the top of the image.
//! Pages without an image are left out of the document.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod layout;
mod pdf;

pub use layout::wrap_text;
pub use pdf::PdfRenderer;
