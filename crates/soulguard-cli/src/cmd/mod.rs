pub mod hash;
pub mod hook;
pub mod init;
pub mod mcp;
pub mod pin;
pub mod precommit;
pub mod verify;
