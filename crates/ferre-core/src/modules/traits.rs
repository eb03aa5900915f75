use super::runner::OutputMode;
use crate::domain::FerreResult;
use std::path::Path;

pub trait ProgramRunner {
    fn run(&self, dir: &Path, mode: OutputMode) -> FerreResult<()>;
}

impl<T> ProgramRunner for &T
where
    T: ProgramRunner + ?Sized,
{
    fn run(&self, dir: &Path, mode: OutputMode) -> FerreResult<()> {
        (**self).run(dir, mode)
    }
}
