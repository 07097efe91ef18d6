//! Discord REST surface as seen by the core: the transport port, the wire
//! types it decodes, and the endpoint paths it calls.

pub mod endpoints;
pub mod port;
pub mod types;
