//! Compiles a declarative description of an FPGA design into the TCL scripts
//! that create and build a Vivado project.

pub mod commands;
pub mod core;
pub mod error;
pub mod util;
