//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod digest;
mod release_id;
mod stemcell;

pub use digest::{Checksums, DeclaredDigest, Digest, DigestAlgorithm, DigestParseError, HashingWriter};
pub use release_id::ReleaseId;
pub use stemcell::Stemcell;
