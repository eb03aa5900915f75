//! Control layer for the FERRE spectral interpolation program: writes its
//! `input.nml`/`input.ipf` control files and runs it in a working directory.

pub mod common;
pub mod domain;
pub mod modules;
