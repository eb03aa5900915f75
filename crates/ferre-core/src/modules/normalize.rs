//! Scalar/array call adapter for parameter-consuming functions.
//!
//! A wrapped function always sees uniform [`ParameterColumns`]. Callers may
//! hand in either scalars or sequences; the shape of `teff` decides which, and
//! a scalar call gets its result collapsed back to the first row.

use crate::domain::{
    FerreError, FerreResult, ParamInput, ParamName, ParameterColumns, ParameterInputs, Shaped,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    Scalar,
    Array,
}

impl CallShape {
    pub fn detect(inputs: &ParameterInputs) -> Self {
        if inputs.teff.is_scalar() {
            Self::Scalar
        } else {
            Self::Array
        }
    }
}

/// Wraps `func` so it accepts scalar-or-sequence inputs.
///
/// Returning `None` from `func` propagates unchanged. In scalar mode a
/// `Some` result is reduced to its first row (an empty result becomes `None`).
pub fn normalize_params<C, T, F>(
    func: F,
) -> impl Fn(C, ParameterInputs) -> FerreResult<Option<Shaped<T>>>
where
    F: Fn(C, ParameterColumns) -> FerreResult<Option<Vec<T>>>,
{
    move |context: C, inputs: ParameterInputs| {
        let shape = CallShape::detect(&inputs);
        let columns = to_columns(inputs, shape)?;
        let Some(rows) = func(context, columns)? else {
            return Ok(None);
        };

        Ok(match shape {
            CallShape::Scalar => rows.into_iter().next().map(Shaped::Scalar),
            CallShape::Array => Some(Shaped::Array(rows)),
        })
    }
}

pub fn to_columns(inputs: ParameterInputs, shape: CallShape) -> FerreResult<ParameterColumns> {
    for (name, input) in inputs.named() {
        check_shape(name, input, shape)?;
    }

    let ParameterInputs {
        teff,
        logg,
        metals,
        am,
        nm,
        cm,
        vm,
    } = inputs;

    ParameterColumns::new(
        into_column(teff),
        into_column(logg),
        into_column(metals),
        into_column(am),
        into_column(nm),
        into_column(cm),
        vm.map(into_column),
    )
}

fn check_shape(name: ParamName, input: &ParamInput, shape: CallShape) -> FerreResult<()> {
    match (shape, input) {
        (CallShape::Scalar, ParamInput::Scalar(_))
        | (CallShape::Array, ParamInput::Sequence(_)) => Ok(()),
        (CallShape::Scalar, ParamInput::Sequence(_)) => Err(FerreError::input_validation(
            "INPUT.PARAM_SHAPE",
            format!("parameter '{}' is a sequence but 'teff' is a scalar", name),
        )),
        (CallShape::Array, ParamInput::Scalar(_)) => Err(FerreError::input_validation(
            "INPUT.PARAM_SHAPE",
            format!("parameter '{}' is a scalar but 'teff' is a sequence", name),
        )),
    }
}

fn into_column(input: ParamInput) -> Vec<f64> {
    match input {
        ParamInput::Scalar(value) => vec![value],
        ParamInput::Sequence(values) => values,
    }
}

#[cfg(test)]
mod tests {
    use super::{CallShape, normalize_params};
    use crate::domain::{FerreResult, ParameterColumns, ParameterInputs, Shaped};

    fn teff_logg_rows(scale: f64, columns: ParameterColumns) -> FerreResult<Option<Vec<[f64; 2]>>> {
        Ok(Some(
            columns
                .records()
                .map(|record| [record.teff * scale, record.logg])
                .collect(),
        ))
    }

    #[test]
    fn scalar_call_matches_first_row_of_single_element_array_call() {
        let adapted = normalize_params(teff_logg_rows);

        let scalar = adapted(2.0, ParameterInputs::new(4500.0, 2.5, 0.0, 0.1, 0.2, -0.1))
            .expect("scalar call should succeed");
        let array = adapted(
            2.0,
            ParameterInputs::new(
                vec![4500.0],
                vec![2.5],
                vec![0.0],
                vec![0.1],
                vec![0.2],
                vec![-0.1],
            ),
        )
        .expect("array call should succeed");

        let Some(Shaped::Array(rows)) = array else {
            panic!("array call should keep every row");
        };
        assert_eq!(scalar, Some(Shaped::Scalar(rows[0])));
    }

    #[test]
    fn array_call_passes_rows_through() {
        let adapted = normalize_params(teff_logg_rows);
        let result = adapted(
            1.0,
            ParameterInputs::new(
                vec![4500.0, 4800.0, 5100.0],
                vec![2.5, 2.7, 3.1],
                vec![0.0; 3],
                vec![0.0; 3],
                vec![0.0; 3],
                vec![0.0; 3],
            ),
        )
        .expect("array call should succeed");

        assert_eq!(
            result,
            Some(Shaped::Array(vec![[4500.0, 2.5], [4800.0, 2.7], [5100.0, 3.1]]))
        );
    }

    #[test]
    fn absent_result_propagates_in_both_modes() {
        let adapted = normalize_params(|_: (), _columns| -> FerreResult<Option<Vec<f64>>> {
            Ok(None)
        });

        assert_eq!(
            adapted((), ParameterInputs::new(4500.0, 2.5, 0.0, 0.0, 0.0, 0.0))
                .expect("call should succeed"),
            None
        );
        assert_eq!(
            adapted(
                (),
                ParameterInputs::new(
                    vec![1.0],
                    vec![1.0],
                    vec![1.0],
                    vec![1.0],
                    vec![1.0],
                    vec![1.0],
                ),
            )
            .expect("call should succeed"),
            None
        );
    }

    #[test]
    fn scalar_vm_is_wrapped_alongside_other_parameters() {
        let adapted = normalize_params(|_: (), columns: ParameterColumns| {
            Ok(Some(vec![columns.vm().map(<[f64]>::to_vec)]))
        });

        let result = adapted(
            (),
            ParameterInputs::new(4500.0, 2.5, 0.0, 0.0, 0.0, 0.0).with_vm(1.5),
        )
        .expect("scalar call should succeed");
        assert_eq!(result, Some(Shaped::Scalar(Some(vec![1.5]))));
    }

    #[test]
    fn mixed_shapes_are_rejected() {
        let adapted = normalize_params(teff_logg_rows);

        let error = adapted(
            1.0,
            ParameterInputs::new(4500.0, vec![2.5, 2.6], 0.0, 0.0, 0.0, 0.0),
        )
        .expect_err("scalar teff with sequence logg should fail");
        assert_eq!(error.placeholder(), "INPUT.PARAM_SHAPE");

        let error = adapted(
            1.0,
            ParameterInputs::new(vec![4500.0], vec![2.5], vec![0.0], vec![0.0], vec![0.0], 0.0),
        )
        .expect_err("sequence teff with scalar cm should fail");
        assert!(error.to_string().contains("'cm'"));
    }

    #[test]
    fn unequal_sequences_are_rejected_before_the_call() {
        let adapted = normalize_params(|_: (), _columns| -> FerreResult<Option<Vec<f64>>> {
            panic!("wrapped function must not run for inconsistent inputs")
        });

        let error = adapted(
            (),
            ParameterInputs::new(
                vec![4500.0, 4600.0],
                vec![2.5, 2.6],
                vec![0.0, 0.0],
                vec![0.0, 0.0],
                vec![0.0, 0.0],
                vec![0.0],
            ),
        )
        .expect_err("unequal lengths should fail");
        assert_eq!(error.placeholder(), "INPUT.PARAM_LENGTH");
    }

    #[test]
    fn shape_detection_follows_teff() {
        let scalar = ParameterInputs::new(4500.0, vec![2.5], 0.0, 0.0, 0.0, 0.0);
        assert_eq!(CallShape::detect(&scalar), CallShape::Scalar);

        let array = ParameterInputs::new(vec![4500.0], 2.5, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(CallShape::detect(&array), CallShape::Array);
    }
}
