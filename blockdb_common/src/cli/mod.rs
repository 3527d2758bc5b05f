//! Pieces shared by the command-line front ends

pub mod constants;
pub mod helpers;
