pub mod authentication;
pub mod capability_flags;
pub mod device;
pub mod device_status;
pub mod module;
pub mod twin;
