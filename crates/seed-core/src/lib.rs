pub mod assets;
pub mod contract;
pub mod error;
pub mod git;
pub mod install;
pub mod io;
pub mod paths;
pub mod profile;
pub mod render;
pub mod scaffold;
pub mod scripts;
pub mod validate;

pub use error::{Result, SeedError};
pub use profile::Profile;
