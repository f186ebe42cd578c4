// entry program
pub mod vproj;

// commands
mod build;
mod create;
mod help;
mod list;

// informational content for help about commands
mod helps;
mod manuals;
