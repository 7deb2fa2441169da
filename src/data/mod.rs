//! Post metadata: types, relation resolution, artifact IO and the
//! runtime store.

pub mod relate;
pub mod store;
pub mod types;
pub mod writer;
