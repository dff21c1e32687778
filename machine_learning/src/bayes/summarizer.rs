use std::{fmt::Debug, hash::Hash};

use indexmap::IndexMap;
use log::{debug, warn};
use ml_core::{MlError, Result, stats};
use ndarray::{ArrayView1, ArrayView2};

use super::{FeatureSummary, TrainedModel};

/// Groups the rows of `x` by their label in `y`.
///
/// Rows keep their original relative order within a group and groups keep the
/// order in which their label first appears in `y`.
///
/// # Arguments
/// * `x` - The feature matrix, one sample per row.
/// * `y` - The label of each row.
///
/// # Returns
/// The rows of each label, or an error if `x` and `y` differ in length.
pub fn split_by_class<'a, L>(
    x: ArrayView2<'a, f64>,
    y: &[L],
) -> Result<IndexMap<L, Vec<ArrayView1<'a, f64>>>>
where
    L: Eq + Hash + Clone,
{
    if x.nrows() != y.len() {
        return Err(MlError::LengthMismatch {
            a: "rows",
            b: "labels",
            got: x.nrows(),
            expected: y.len(),
        });
    }

    let mut groups: IndexMap<L, Vec<ArrayView1<'a, f64>>> = IndexMap::new();
    for (row, label) in x.into_outer_iter().zip(y) {
        groups.entry(label.clone()).or_default().push(row);
    }

    Ok(groups)
}

/// Summarizes every feature of a single class.
///
/// # Arguments
/// * `instances` - The rows of the class, all of the same length.
///
/// # Returns
/// One `FeatureSummary` per feature column, or an error if the rows are ragged,
/// there are none, or there are too few to estimate a stdev.
pub fn fit_one_class(instances: &[ArrayView1<f64>]) -> Result<Vec<FeatureSummary>> {
    let Some(first) = instances.first() else {
        return Err(MlError::EmptyInput { what: "class" });
    };

    let nfeatures = first.len();
    if let Some(row) = instances.iter().find(|row| row.len() != nfeatures) {
        return Err(MlError::DimensionMismatch {
            what: "instance",
            got: row.len(),
            expected: nfeatures,
        });
    }

    let mut column = Vec::with_capacity(instances.len());
    (0..nfeatures)
        .map(|i| {
            column.clear();
            column.extend(instances.iter().map(|row| row[i]));
            Ok(FeatureSummary::new(
                stats::mean(&column)?,
                stats::stdev(&column)?,
            ))
        })
        .collect()
}

/// Fits a Gaussian Naive Bayes model.
///
/// # Arguments
/// * `x` - The training feature matrix, one sample per row.
/// * `y` - The label of each row.
///
/// # Returns
/// The trained model, or an error if the data is empty, `x` and `y` differ in
/// length, or a label has a single training row.
pub fn fit<L>(x: ArrayView2<f64>, y: &[L]) -> Result<TrainedModel<L>>
where
    L: Eq + Hash + Clone + Debug,
{
    let groups = split_by_class(x, y)?;
    if groups.is_empty() {
        return Err(MlError::EmptyInput { what: "labels" });
    }

    let mut classes = IndexMap::with_capacity(groups.len());

    for (label, instances) in groups {
        let summaries = fit_one_class(&instances)?;

        let degenerate = summaries.iter().filter(|s| s.is_degenerate()).count();
        if degenerate > 0 {
            warn!("class {label:?} has {degenerate} constant feature(s)");
        }
        debug!("fitted class {label:?} over {} row(s)", instances.len());

        classes.insert(label, summaries);
    }

    Ok(TrainedModel::new(classes, x.ncols()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const EPS: f64 = 1e-12;

    #[test]
    fn split_preserves_row_and_label_order() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0]];
        let y = ["b", "a", "b", "c", "a"];

        let groups = split_by_class(x.view(), &y).unwrap();

        let labels: Vec<_> = groups.keys().copied().collect();
        assert_eq!(labels, ["b", "a", "c"]);

        let b: Vec<f64> = groups["b"].iter().map(|r| r[0]).collect();
        let a: Vec<f64> = groups["a"].iter().map(|r| r[0]).collect();
        assert_eq!(b, [1.0, 3.0]);
        assert_eq!(a, [2.0, 5.0]);
    }

    #[test]
    fn split_rows_outlive_the_borrowed_view() {
        let x = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let y = [1, 2, 1];

        let groups = {
            let view = x.view();
            split_by_class(view, &y).unwrap()
        };

        let ones: Vec<f64> = groups[&1].iter().map(|r| r[1]).collect();
        assert_eq!(ones, [2.0, 6.0]);
        assert_eq!(groups[&2][0], array![3.0, 4.0]);
    }

    #[test]
    fn split_rejects_length_mismatch() {
        let x = array![[1.0], [2.0]];
        let err = split_by_class(x.view(), &[0]).unwrap_err();
        assert!(matches!(err, MlError::LengthMismatch { got: 2, expected: 1, .. }));
    }

    #[test]
    fn fit_one_class_summarizes_columns() {
        let x = array![[5.0, 1.0], [7.0, 3.0]];
        let rows: Vec<_> = x.outer_iter().collect();

        let summaries = fit_one_class(&rows).unwrap();

        assert_eq!(summaries.len(), 2);
        assert!((summaries[0].mean - 6.0).abs() < EPS);
        assert!((summaries[0].stdev - 2f64.sqrt()).abs() < EPS);
        assert!((summaries[1].mean - 2.0).abs() < EPS);
        assert!((summaries[1].stdev - 2f64.sqrt()).abs() < EPS);
    }

    #[test]
    fn fit_one_class_rejects_ragged_rows() {
        let long = array![1.0, 2.0];
        let short = array![1.0];
        let err = fit_one_class(&[long.view(), short.view()]).unwrap_err();
        assert_eq!(
            err,
            MlError::DimensionMismatch {
                what: "instance",
                got: 1,
                expected: 2,
            }
        );
    }

    #[test]
    fn fit_one_class_of_no_rows_fails() {
        assert!(matches!(
            fit_one_class(&[]),
            Err(MlError::EmptyInput { .. })
        ));
    }

    #[test]
    fn fit_keeps_every_label_in_first_seen_order() {
        let x = array![[1.0], [5.0], [1.0], [7.0]];
        let y = ['A', 'B', 'A', 'B'];

        let model = fit(x.view(), &y).unwrap();

        assert_eq!(model.nfeatures(), 1);
        assert_eq!(model.labels().copied().collect::<Vec<_>>(), ['A', 'B']);
        assert_eq!(model.class(&'A').unwrap(), &[FeatureSummary::new(1.0, 0.0)]);

        let b = model.class(&'B').unwrap()[0];
        assert!((b.mean - 6.0).abs() < EPS);
        assert!((b.stdev - 2f64.sqrt()).abs() < EPS);
    }

    #[test]
    fn fit_rejects_single_sample_class() {
        let x = array![[1.0], [2.0], [9.0]];
        let err = fit(x.view(), &[0, 0, 1]).unwrap_err();
        assert!(matches!(err, MlError::InsufficientSamples { got: 1, .. }));
    }

    #[test]
    fn fit_rejects_empty_labels() {
        let x = ndarray::Array2::<f64>::zeros((0, 3));
        let err = fit::<u8>(x.view(), &[]).unwrap_err();
        assert_eq!(err, MlError::EmptyInput { what: "labels" });
    }

    #[test]
    fn fit_reports_rows_without_labels_as_length_mismatch() {
        let x = array![[1.0], [2.0]];
        let err = fit::<u8>(x.view(), &[]).unwrap_err();
        assert_eq!(
            err,
            MlError::LengthMismatch {
                a: "rows",
                b: "labels",
                got: 2,
                expected: 0,
            }
        );
    }
}
