pub mod interpolate;
pub mod ipf;
pub mod nml;
pub mod normalize;
pub mod runner;
pub mod serialization;

mod traits;

pub use interpolate::{InterpolationRun, interpolate};
pub use ipf::write_interpolate_ipf;
pub use nml::write_input_nml;
pub use normalize::normalize_params;
pub use runner::{FerreRunner, OutputMode, run_ferre};
pub use traits::ProgramRunner;
