//! # relharmony core
//!
//! Domain types, the consolidated heading table, and error definitions for the
//! relharmony release-report engine. This crate does no text processing of its
//! own beyond validating values at construction; the engine crate implements
//! extraction and harmonization against these types.
//!
//! ## Model
//!
//! - [`VersionTag`]: a validated `NN.N.N.N` release identifier
//! - [`DocumentFragment`]: one version's slice of a stitched input
//! - [`Dialect`]: which heading/table convention a fragment uses
//! - [`SectionKey`]: the four report sections the engine recovers
//! - [`PairingStrategy`]: how fragments are labelled with versions
//! - [`ExtractedSection`]: a section body or the not-found sentinel
//! - [`HarmonizedDocument`]: the merged cross-version document

pub mod document;
pub mod error;
pub mod headings;
pub mod pairing;
pub mod product;
pub mod section;
pub mod version;

// Re-export key types at crate root for ergonomics
pub use document::{
    DocumentFragment, ExtractedSections, HarmonizedBlock, HarmonizedDocument, RenderedSection,
    VersionedBody,
};
pub use error::{Error, PreconditionError, Result};
pub use headings::{Heading, HeadingStyle, TableRebuild};
pub use pairing::{PairingStrategy, ParsePairingError};
pub use product::Product;
pub use section::{Dialect, ExtractedSection, SECTION_NOT_FOUND, SectionKey};
pub use version::VersionTag;
