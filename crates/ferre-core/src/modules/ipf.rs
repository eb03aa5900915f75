//! Writer for the FERRE `input.ipf` parameter file.
//!
//! One line per record: a placeholder id, then `[log10(vm)] cm nm am metals
//! logg teff`. Everything is printed with 3 decimals except teff (1 decimal).

use super::normalize::normalize_params;
use super::serialization::{format_fixed_f64, write_text_artifact};
use crate::domain::{
    FerreError, FerreResult, INPUT_IPF, ParameterColumns, ParameterInputs, ParameterRecord,
};
use std::path::{Path, PathBuf};

pub const RECORD_ID: &str = "dummy";

pub fn render_ipf_line(record: &ParameterRecord) -> String {
    let mut fields = vec![RECORD_ID.to_string()];
    if let Some(vm) = record.vm {
        fields.push(format_fixed_f64(vm.log10(), 3));
    }
    for value in [record.cm, record.nm, record.am, record.metals, record.logg] {
        fields.push(format_fixed_f64(value, 3));
    }
    fields.push(format_fixed_f64(record.teff, 1));
    fields.join(" ")
}

/// Writes `<dir>/input.ipf` for an interpolation run. Scalars and sequences
/// are both accepted; see [`normalize_params`].
pub fn write_interpolate_ipf(dir: &Path, inputs: ParameterInputs) -> FerreResult<PathBuf> {
    normalize_params(write_ipf_columns)(dir, inputs)?;
    Ok(dir.join(INPUT_IPF))
}

fn write_ipf_columns(dir: &Path, columns: ParameterColumns) -> FerreResult<Option<Vec<()>>> {
    if let Some(vm) = columns.vm() {
        if let Some(index) = vm.iter().position(|value| value.is_nan() || *value <= 0.0) {
            return Err(FerreError::input_validation(
                "INPUT.PARAM_VM",
                format!(
                    "microturbulence must be positive for log10, got {} at record {}",
                    vm[index], index
                ),
            ));
        }
    }

    let mut content = String::new();
    for record in columns.records() {
        content.push_str(&render_ipf_line(&record));
        content.push('\n');
    }

    let path = dir.join(INPUT_IPF);
    write_text_artifact(&path, &content)?;
    tracing::info!(
        path = %path.display(),
        records = columns.len(),
        with_vm = columns.has_vm(),
        "wrote FERRE parameter file"
    );
    Ok(None)
}
