pub mod digest;
pub mod error;
pub mod gate;
pub mod git;
pub mod io;
pub mod paths;
pub mod record;
pub mod soul;
pub mod startup;

pub use error::{Result, SoulguardError};
