//! Storage upload client.
//!
//! Uploads local files to the pinning service's IPFS node and returns the CID
//! the storage network assigned.

mod ipfs;

pub use ipfs::IpfsUploadClient;
