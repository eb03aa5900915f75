//! Writer for the FERRE `input.nml` namelist.

use super::serialization::write_text_artifact;
use crate::common::config::GridHeaderResolver;
use crate::domain::{FerreResult, INPUT_NML, RunConfiguration};
use std::path::{Path, PathBuf};

const NAMELIST_OPEN: &str = "&LISTA";
const NAMELIST_CLOSE: &str = "/";

/// Renders the namelist for `config` with `synthfile` as the grid header.
pub fn render_input_nml(config: &RunConfiguration, synthfile: &Path) -> String {
    let indv = (1..=config.ndim)
        .map(|index| index.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let lines = [
        NAMELIST_OPEN.to_string(),
        format!("NDIM = {}", config.ndim),
        format!("NOV = {}", config.nov),
        format!("INDV = {}", indv),
        format!("SYNTHFILE(1) = '{}'", synthfile.display()),
        format!("PFILE = '{}'", config.pfile),
        format!("OFFILE = '{}'", config.offile),
        format!("INTER = {}", config.inter),
        format!("F_FORMAT = {}", config.f_format.code()),
        format!("F_ACCESS = {}", config.f_access.code()),
        NAMELIST_CLOSE.to_string(),
    ];

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// Writes `<dir>/input.nml`, overwriting any previous file.
///
/// The grid header comes from `config.synthfile`, or from `resolver` when
/// the configuration leaves it unset.
pub fn write_input_nml(
    dir: &Path,
    config: &RunConfiguration,
    resolver: &dyn GridHeaderResolver,
) -> FerreResult<PathBuf> {
    config.validate()?;
    let synthfile = match &config.synthfile {
        Some(path) => path.clone(),
        None => resolver.grid_header_path()?,
    };

    let path = dir.join(INPUT_NML);
    write_text_artifact(&path, &render_input_nml(config, &synthfile))?;
    tracing::info!(
        path = %path.display(),
        ndim = config.ndim,
        nov = config.nov,
        synthfile = %synthfile.display(),
        "wrote FERRE namelist"
    );
    Ok(path)
}
