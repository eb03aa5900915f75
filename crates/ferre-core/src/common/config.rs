//! Model-grid header lookup.
//!
//! The namelist needs the path of the grid's header file. Where that lives is
//! site configuration, so the writer only sees a [`GridHeaderResolver`].

use crate::domain::{FerreError, FerreResult};
use std::path::PathBuf;

pub const SYNTHFILE_ENV: &str = "FERRE_SYNTHFILE";
pub const LIBRARY_DIR_ENV: &str = "FERRE_LIBRARY_DIR";
pub const GRID_NAME_ENV: &str = "FERRE_GRID";
pub const DEFAULT_GRID_NAME: &str = "p_apsgfrom_00";

pub trait GridHeaderResolver {
    fn grid_header_path(&self) -> FerreResult<PathBuf>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedGridHeader {
    path: PathBuf,
}

impl FixedGridHeader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GridHeaderResolver for FixedGridHeader {
    fn grid_header_path(&self) -> FerreResult<PathBuf> {
        Ok(self.path.clone())
    }
}

/// Resolves the header from `FERRE_SYNTHFILE`, falling back to
/// `$FERRE_LIBRARY_DIR/<grid>.hdr` where `<grid>` is `FERRE_GRID` or
/// [`DEFAULT_GRID_NAME`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvGridHeaderResolver {
    synthfile: Option<String>,
    library_dir: Option<String>,
    grid_name: Option<String>,
}

impl EnvGridHeaderResolver {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            synthfile: non_blank(SYNTHFILE_ENV),
            library_dir: non_blank(LIBRARY_DIR_ENV),
            grid_name: non_blank(GRID_NAME_ENV),
        }
    }
}

impl GridHeaderResolver for EnvGridHeaderResolver {
    fn grid_header_path(&self) -> FerreResult<PathBuf> {
        if let Some(synthfile) = &self.synthfile {
            return Ok(PathBuf::from(synthfile));
        }

        let Some(library_dir) = &self.library_dir else {
            return Err(FerreError::config(
                "INPUT.GRID_HEADER",
                format!(
                    "no model grid header configured; set {} or {}",
                    SYNTHFILE_ENV, LIBRARY_DIR_ENV
                ),
            ));
        };

        let grid = self.grid_name.as_deref().unwrap_or(DEFAULT_GRID_NAME);
        Ok(PathBuf::from(library_dir).join(format!("{}.hdr", grid)))
    }
}
