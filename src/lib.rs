//! # Cinta - Continuous-Tape Label Composer
//!
//! Cinta composes printable label bitmaps for continuous-tape label
//! printers. Given a label's text, an optional code payload, a template and
//! a tape class, it produces an RGB image whose height is exactly the
//! tape's printable height and whose width follows from the content. It
//! provides:
//!
//! - **Scale model**: four tape classes, every layout constant scaled from
//!   the 29mm reference tape
//! - **Font fitting**: binary search for the largest font size that fits a
//!   pixel budget
//! - **Eight templates**: code + text arrangements, rotated text, large
//!   shelf and storage numbers
//! - **Batches**: parallel composition with per-label failures
//! - **Transport**: a print sink capability with a PNG spool implementation
//!
//! ## Quick Start
//!
//! ```no_run
//! use cinta::{Composer, FontSpec, LabelContent, PngSink, PrintJob, TapeClass, TemplateVariant};
//!
//! // Load the bundled font; cap text at 120pt
//! let composer = Composer::new(&FontSpec::default().with_max_size(120))?;
//!
//! // Describe the label
//! let content = LabelContent::new("BOX 18").with_code("https://inventory.local/box/18");
//!
//! // Compose it for 62mm tape
//! let tape = TapeClass::from_mm(62)?;
//! let label = composer.compose(TemplateVariant::Horizontal, &content, tape)?;
//! label.save_png("box18.png")?;
//!
//! // "Print" two copies into a spool directory
//! let mut sink = PngSink::new("spool")?;
//! cinta::transport::print_copies(&mut sink, &label, &PrintJob::new(tape), 2)?;
//!
//! # Ok::<(), cinta::LabelError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`tape`] | Tape classes and the scale model |
//! | [`font`] | Font loading, measurement, drawing; [`font::fit`] size search |
//! | [`code`] | Code encoder capability and QR bitmaps |
//! | [`label`] | Label content, validation, prefix and increment helpers |
//! | [`compose`] | The eight templates, rotation, border, watermark |
//! | [`batch`] | Parallel batch composition and preview strips |
//! | [`transport`] | Print sinks and print job options |
//! | [`error`] | Error types |
//!
//! ## Supported Tapes
//!
//! 29mm, 38mm, 50mm and 62mm continuous tape at 300 DPI.

pub mod batch;
pub mod code;
pub mod compose;
pub mod error;
pub mod font;
pub mod label;
pub mod tape;
pub mod transport;

// Re-exports for convenience
pub use batch::{BatchEntry, BatchFile, BatchReport, compose_batch};
pub use code::{CodeEncoder, QrEncoder};
pub use compose::{ComposedImage, Composer, TemplateVariant, compose};
pub use error::LabelError;
pub use font::FontSpec;
pub use font::fit::OverflowPolicy;
pub use label::LabelContent;
pub use tape::TapeClass;
pub use transport::{LabelSink, PngSink, PrintJob, Rotation};
