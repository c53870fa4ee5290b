pub mod rpc;
pub mod trigger;
pub mod version;
