pub mod install;
pub mod scaffold;
pub mod validate;
