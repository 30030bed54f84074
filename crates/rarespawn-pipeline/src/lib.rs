//! Alert formatting pipeline.
//!
//! Raw alert text goes through [`extract`], [`Resolver`], and [`render`] to
//! become a one-line summary. Text starting with the configured command
//! prefix instead updates the sender's label in the [`LabelStore`].
//! [`Pipeline::handle`] is the single entry point and always returns a reply.

pub mod bootstrap;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod labels;
pub mod render;
pub mod resolve;
pub mod translate;
pub mod types;

pub use bootstrap::{build_pipeline, google_translator, translate_settings};
pub use dispatch::{classify, Command, Pipeline, Reply};
pub use error::{PipelineError, TranslateError};
pub use extract::extract;
pub use labels::LabelStore;
pub use render::render;
pub use resolve::{flag_glyph, Resolver, TranslateSettings};
pub use translate::{GoogleTranslator, PassthroughTranslator, Translator};
pub use types::{Coordinates, ExtractedFields, RawMessage, ResolvedFields, SizeFlag};
