//! Canonical artifact facts and the registry they are read from
//!
//! This module owns the data the rest of the engine works on. Raw metadata from an
//! ingestion source is turned into an immutable [`ArtifactFacts`] record by
//! [`normalize`], and artifacts are looked up through the read-only [`Registry`] trait.
//!
//! # Implementation Model
//!
//! - **Identifiers**: [`ArtifactId`] validates the allowed character class once, so
//!   every other module can treat ids as trusted opaque keys.
//! - **Lineage references**: each [`ParentRef`] records the target (a registry id or an
//!   external URL), the relationship, and the metadata field it came from.
//! - **Activity**: optional repository history used by the bus-factor and reviewedness
//!   metrics.
//! - **Registry**: the engine depends on the [`Registry`] trait only. [`MemoryRegistry`]
//!   is the in-process implementation used by the command-line host and tests.

mod activity;
mod artifact_facts;
mod artifact_id;
mod normalizer;
mod registry;

pub use activity::{Activity, ChangeRequest, Contributor, FileChange, code_additions};
pub use artifact_facts::{ArtifactFacts, ArtifactKind, DemoOutcome, ParentRef, ParentTarget, Relationship, SourceTag};
pub use artifact_id::{ArtifactId, MAX_ID_LEN};
pub use normalizer::{DEFAULT_VERSION, MalformedMetadataError, RawMetadata, normalize};
pub use registry::{LoadedRegistry, MemoryRegistry, Registry, load_registry};
