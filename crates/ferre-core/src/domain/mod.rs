pub mod errors;

pub use errors::{CapturedOutput, ErrorCategory, FerreError, FerreResult};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub const INPUT_NML: &str = "input.nml";
pub const INPUT_IPF: &str = "input.ipf";
pub const DEFAULT_OUTPUT_FILE: &str = "output.dat";

/// One stellar parameter as handed in by a caller: a single value or a
/// column of values.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamInput {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl ParamInput {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}

impl From<f64> for ParamInput {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<f64>> for ParamInput {
    fn from(values: Vec<f64>) -> Self {
        Self::Sequence(values)
    }
}

impl From<&[f64]> for ParamInput {
    fn from(values: &[f64]) -> Self {
        Self::Sequence(values.to_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamName {
    Teff,
    Logg,
    Metals,
    Am,
    Nm,
    Cm,
    Vm,
}

impl ParamName {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Teff => "teff",
            Self::Logg => "logg",
            Self::Metals => "metals",
            Self::Am => "am",
            Self::Nm => "nm",
            Self::Cm => "cm",
            Self::Vm => "vm",
        }
    }
}

impl Display for ParamName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Scalar-or-sequence arguments for a parameter-consuming function.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInputs {
    pub teff: ParamInput,
    pub logg: ParamInput,
    pub metals: ParamInput,
    pub am: ParamInput,
    pub nm: ParamInput,
    pub cm: ParamInput,
    pub vm: Option<ParamInput>,
}

impl ParameterInputs {
    pub fn new(
        teff: impl Into<ParamInput>,
        logg: impl Into<ParamInput>,
        metals: impl Into<ParamInput>,
        am: impl Into<ParamInput>,
        nm: impl Into<ParamInput>,
        cm: impl Into<ParamInput>,
    ) -> Self {
        Self {
            teff: teff.into(),
            logg: logg.into(),
            metals: metals.into(),
            am: am.into(),
            nm: nm.into(),
            cm: cm.into(),
            vm: None,
        }
    }

    pub fn with_vm(mut self, vm: impl Into<ParamInput>) -> Self {
        self.vm = Some(vm.into());
        self
    }

    pub(crate) fn named(&self) -> impl Iterator<Item = (ParamName, &ParamInput)> {
        [
            (ParamName::Teff, &self.teff),
            (ParamName::Logg, &self.logg),
            (ParamName::Metals, &self.metals),
            (ParamName::Am, &self.am),
            (ParamName::Nm, &self.nm),
            (ParamName::Cm, &self.cm),
        ]
        .into_iter()
        .chain(self.vm.as_ref().map(|vm| (ParamName::Vm, vm)))
    }
}

/// Uniform-length parameter columns. Construction checks that every column
/// holds the same number of values.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterColumns {
    teff: Vec<f64>,
    logg: Vec<f64>,
    metals: Vec<f64>,
    am: Vec<f64>,
    nm: Vec<f64>,
    cm: Vec<f64>,
    vm: Option<Vec<f64>>,
}

impl ParameterColumns {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        teff: Vec<f64>,
        logg: Vec<f64>,
        metals: Vec<f64>,
        am: Vec<f64>,
        nm: Vec<f64>,
        cm: Vec<f64>,
        vm: Option<Vec<f64>>,
    ) -> FerreResult<Self> {
        let expected = teff.len();
        let columns = [
            (ParamName::Logg, logg.len()),
            (ParamName::Metals, metals.len()),
            (ParamName::Am, am.len()),
            (ParamName::Nm, nm.len()),
            (ParamName::Cm, cm.len()),
        ]
        .into_iter()
        .chain(vm.as_ref().map(|values| (ParamName::Vm, values.len())));

        for (name, len) in columns {
            if len != expected {
                return Err(FerreError::input_validation(
                    "INPUT.PARAM_LENGTH",
                    format!(
                        "parameter '{}' has {} values but 'teff' has {}",
                        name, len, expected
                    ),
                ));
            }
        }

        Ok(Self {
            teff,
            logg,
            metals,
            am,
            nm,
            cm,
            vm,
        })
    }

    pub fn len(&self) -> usize {
        self.teff.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teff.is_empty()
    }

    pub fn has_vm(&self) -> bool {
        self.vm.is_some()
    }

    pub fn vm(&self) -> Option<&[f64]> {
        self.vm.as_deref()
    }

    pub fn records(&self) -> impl Iterator<Item = ParameterRecord> + '_ {
        (0..self.len()).map(|index| ParameterRecord {
            teff: self.teff[index],
            logg: self.logg[index],
            metals: self.metals[index],
            am: self.am[index],
            nm: self.nm[index],
            cm: self.cm[index],
            vm: self.vm.as_ref().map(|values| values[index]),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRecord {
    pub teff: f64,
    pub logg: f64,
    pub metals: f64,
    pub am: f64,
    pub nm: f64,
    pub cm: f64,
    pub vm: Option<f64>,
}

/// Result of a normalized call: collapsed to one row when the caller passed
/// scalars, otherwise every row.
#[derive(Debug, Clone, PartialEq)]
pub enum Shaped<T> {
    Scalar(T),
    Array(Vec<T>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    Ascii,
    #[default]
    Unformatted,
}

impl FileFormat {
    pub const fn code(self) -> u8 {
        match self {
            Self::Ascii => 0,
            Self::Unformatted => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Ascii),
            1 => Some(Self::Unformatted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAccess {
    LoadWhole,
    #[default]
    Direct,
}

impl FileAccess {
    pub const fn code(self) -> u8 {
        match self {
            Self::LoadWhole => 0,
            Self::Direct => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::LoadWhole),
            1 => Some(Self::Direct),
            _ => None,
        }
    }
}

/// Options for one FERRE run, rendered into `input.nml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfiguration {
    pub ndim: usize,
    /// Number of parameters to search; 0 means pure interpolation.
    pub nov: usize,
    /// Model grid header. Resolved through a `GridHeaderResolver` when unset.
    pub synthfile: Option<PathBuf>,
    pub pfile: String,
    pub offile: String,
    pub inter: u32,
    pub f_format: FileFormat,
    pub f_access: FileAccess,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            ndim: 6,
            nov: 0,
            synthfile: None,
            pfile: INPUT_IPF.to_string(),
            offile: DEFAULT_OUTPUT_FILE.to_string(),
            inter: 3,
            f_format: FileFormat::default(),
            f_access: FileAccess::default(),
        }
    }
}

impl RunConfiguration {
    pub fn new(pfile: impl Into<String>, offile: impl Into<String>) -> Self {
        Self {
            pfile: pfile.into(),
            offile: offile.into(),
            ..Self::default()
        }
    }

    pub fn from_json_str(content: &str) -> FerreResult<Self> {
        serde_json::from_str(content).map_err(|source| {
            FerreError::config(
                "INPUT.RUN_CONFIG",
                format!("failed to parse run configuration: {}", source),
            )
        })
    }

    pub fn from_json_file(path: &Path) -> FerreResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| {
            FerreError::config(
                "INPUT.RUN_CONFIG",
                format!(
                    "failed to read run configuration '{}': {}",
                    path.display(),
                    source
                ),
            )
        })?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> FerreResult<()> {
        if self.ndim == 0 {
            return Err(FerreError::input_validation(
                "INPUT.NDIM",
                "ndim must be at least 1",
            ));
        }
        if self.nov > self.ndim {
            return Err(FerreError::input_validation(
                "INPUT.NOV",
                format!(
                    "nov ({}) cannot exceed ndim ({})",
                    self.nov, self.ndim
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        FileAccess, FileFormat, ParamInput, ParameterColumns, ParameterInputs, RunConfiguration,
    };
    use std::path::PathBuf;

    #[test]
    fn columns_reject_unequal_lengths() {
        let error = ParameterColumns::new(
            vec![4500.0, 4600.0],
            vec![2.5, 2.6],
            vec![0.0, 0.0],
            vec![0.1],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            None,
        )
        .expect_err("mismatched columns should fail");

        assert_eq!(error.placeholder(), "INPUT.PARAM_LENGTH");
        assert!(error.to_string().contains("'am' has 1 values"));
    }

    #[test]
    fn columns_check_vm_length() {
        let error = ParameterColumns::new(
            vec![4500.0],
            vec![2.5],
            vec![0.0],
            vec![0.1],
            vec![0.0],
            vec![0.0],
            Some(vec![1.0, 2.0]),
        )
        .expect_err("vm length mismatch should fail");
        assert!(error.to_string().contains("'vm'"));
    }

    #[test]
    fn records_follow_column_order() {
        let columns = ParameterColumns::new(
            vec![4500.0, 5000.0],
            vec![2.5, 3.0],
            vec![-0.5, 0.0],
            vec![0.2, 0.1],
            vec![0.3, 0.0],
            vec![-0.1, 0.0],
            Some(vec![1.5, 2.0]),
        )
        .expect("columns should be valid");

        let records: Vec<_> = columns.records().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].teff, 5000.0);
        assert_eq!(records[0].cm, -0.1);
        assert_eq!(records[1].vm, Some(2.0));
    }

    #[test]
    fn inputs_convert_from_scalars_and_vectors() {
        let inputs = ParameterInputs::new(4500.0, 2.5, 0.0, 0.0, 0.0, 0.0).with_vm(vec![1.0]);
        assert!(inputs.teff.is_scalar());
        assert_eq!(inputs.vm, Some(ParamInput::Sequence(vec![1.0])));
    }

    #[test]
    fn run_configuration_defaults_match_ferre_conventions() {
        let config = RunConfiguration::default();
        assert_eq!(config.ndim, 6);
        assert_eq!(config.nov, 0);
        assert_eq!(config.inter, 3);
        assert_eq!(config.f_format.code(), 1);
        assert_eq!(config.f_access.code(), 1);
        assert!(config.synthfile.is_none());
    }

    #[test]
    fn run_configuration_parses_partial_json() {
        let config = RunConfiguration::from_json_str(
            r#"{ "ndim": 7, "synthfile": "/grids/p_apsgfrom.hdr", "f_format": "ascii", "f_access": "load_whole" }"#,
        )
        .expect("config should parse");

        assert_eq!(config.ndim, 7);
        assert_eq!(config.synthfile, Some(PathBuf::from("/grids/p_apsgfrom.hdr")));
        assert_eq!(config.f_format, FileFormat::Ascii);
        assert_eq!(config.f_access, FileAccess::LoadWhole);
        assert_eq!(config.pfile, "input.ipf");
    }

    #[test]
    fn run_configuration_rejects_unknown_keys() {
        let error = RunConfiguration::from_json_str(r#"{ "ndimm": 7 }"#)
            .expect_err("unknown keys should be rejected");
        assert_eq!(error.placeholder(), "INPUT.RUN_CONFIG");
    }

    #[test]
    fn run_configuration_validation_guards_dimensions() {
        let mut config = RunConfiguration::default();
        config.ndim = 0;
        assert!(config.validate().is_err());

        config.ndim = 3;
        config.nov = 4;
        assert!(config.validate().is_err());

        config.nov = 3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_codes_round_trip() {
        assert_eq!(FileFormat::from_code(0), Some(FileFormat::Ascii));
        assert_eq!(FileAccess::from_code(1), Some(FileAccess::Direct));
        assert_eq!(FileFormat::from_code(2), None);
    }
}
