//! askdoc-ingest
//!
//! Turns a folder of heterogeneous files (pdf/docx/txt) into the ordered
//! chunk corpus the index is built from. A file that cannot be read is
//! skipped with a warning; it never aborts the rest of the load.

pub mod chunker;
pub mod extract;
pub mod loader;
pub mod normalize;

pub use chunker::Chunker;
pub use extract::ExtractorSet;
pub use loader::DocumentLoader;
