//! Pipeline Steps

use crate::PipelineError;
use data_sanitizer::{sanitize, SanitizeReport, COL_PRICE};
use regression_tree::{train_test_split, Evaluation, RegressionTree, TreeConfig};
use std::path::Path;
use table_io::{read_csv, write_csv, Table};
use tracing::info;

/// Options for a training run.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Tree hyperparameters
    pub config: TreeConfig,
    /// Fraction of rows held out for evaluation
    pub test_fraction: f64,
    /// Shuffle seed for the train/test split
    pub seed: u64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            config: TreeConfig::default(),
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

/// Load a raw dataset, sanitize it, and write the clean dataset.
pub fn clean_dataset(input: &Path, output: &Path) -> Result<SanitizeReport, PipelineError> {
    let raw = read_csv(input)?;
    let (clean, report) = sanitize(raw)?;
    write_csv(&clean, output)?;
    info!(
        rows_in = report.rows_in,
        rows_out = report.rows_out,
        dropped = report.price_rows_dropped,
        output = %output.display(),
        "clean dataset written"
    );
    Ok(report)
}

/// Split a clean table into a feature matrix, target vector, and the
/// feature schema (every column except the price, in table order).
#[allow(clippy::type_complexity)]
pub fn features_and_target(
    table: &Table,
) -> Result<(Vec<Vec<f64>>, Vec<f64>, Vec<String>), PipelineError> {
    // Force the missing-column error before scanning cells
    table.column(COL_PRICE)?;

    let feature_names: Vec<String> = table
        .column_names()
        .iter()
        .filter(|name| name.as_str() != COL_PRICE)
        .cloned()
        .collect();

    let mut x = Vec::with_capacity(table.n_rows());
    let mut y = Vec::with_capacity(table.n_rows());
    for (row_idx, row) in table.rows().iter().enumerate() {
        let mut features = Vec::with_capacity(feature_names.len());
        for (name, cell) in table.column_names().iter().zip(row) {
            let value = cell.as_number().ok_or_else(|| PipelineError::NonNumericCell {
                column: name.clone(),
                row: row_idx,
            })?;
            if name.as_str() == COL_PRICE {
                y.push(value);
            } else {
                features.push(value);
            }
        }
        x.push(features);
    }

    Ok((x, y, feature_names))
}

/// Load a clean dataset, fit a regression tree, evaluate it on the
/// held-out split, and persist the model.
pub fn train_model(
    input: &Path,
    model_path: &Path,
    options: &TrainOptions,
) -> Result<Evaluation, PipelineError> {
    let table = read_csv(input)?;
    if table.n_rows() == 0 {
        return Err(PipelineError::EmptyDataset);
    }

    let (x, y, feature_names) = features_and_target(&table)?;
    let ((x_train, y_train), (x_test, y_test)) =
        train_test_split(&x, &y, options.test_fraction, options.seed);

    let tree = RegressionTree::fit(&x_train, &y_train, feature_names, options.config.clone())?;

    let y_pred = tree.predict_batch(&x_test);
    let evaluation = Evaluation::compute(&y_test, &y_pred);
    info!(
        mae = evaluation.mae,
        r2 = evaluation.r2,
        n_test = evaluation.n_test,
        "model evaluation"
    );

    tree.save(model_path)?;
    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_raw_csv(path: &Path) {
        let mut file = std::fs::File::create(path).unwrap();
        writeln!(file, "surface_area,room_count,age,price,location").unwrap();
        writeln!(file, "85m2,tres,nueva,95000,Urban").unwrap();
        writeln!(file, "120,4,10,250000,rural").unwrap();
        writeln!(file, "60,2,30,80000,rural").unwrap();
        writeln!(file, "200,5,-3,450000,urbano").unwrap();
        writeln!(file, "90,3,5,5000,rural").unwrap();
        writeln!(file, "150,15,8,300000,RURALL").unwrap();
        writeln!(file, "75,3,12,110000,urbnaa").unwrap();
        writeln!(file, "110,,7,180000,urban").unwrap();
    }

    #[test]
    fn test_clean_then_train_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw.csv");
        let clean = dir.path().join("clean.csv");
        let model = dir.path().join("models/price_tree.json");
        write_raw_csv(&raw);

        let report = clean_dataset(&raw, &clean).unwrap();
        assert_eq!(report.rows_in, 8);
        assert_eq!(report.price_rows_dropped, 1);
        assert_eq!(report.rows_out, 7);

        let evaluation = train_model(&clean, &model, &TrainOptions::default()).unwrap();
        assert!(evaluation.n_test >= 1);

        let loaded = RegressionTree::load(&model).unwrap();
        assert!(loaded
            .feature_names
            .contains(&"location_rural".to_string()));
        assert!(!loaded.feature_names.contains(&"price".to_string()));

        let prediction = loaded.predict(&[100.0, 3.0, 5.0, 1.0]);
        assert!(prediction > 10_000.0 && prediction < 1_000_000.0);
    }

    #[test]
    fn test_features_and_target_excludes_price() {
        let table = Table::new(
            vec![
                "surface_area".to_string(),
                "price".to_string(),
                "location_rural".to_string(),
            ],
            vec![vec![
                table_io::Value::Number(80.0),
                table_io::Value::Number(120000.0),
                table_io::Value::Number(1.0),
            ]],
        )
        .unwrap();

        let (x, y, names) = features_and_target(&table).unwrap();
        assert_eq!(names, vec!["surface_area", "location_rural"]);
        assert_eq!(x, vec![vec![80.0, 1.0]]);
        assert_eq!(y, vec![120000.0]);
    }

    #[test]
    fn test_non_numeric_cell_rejected() {
        let table = Table::new(
            vec!["surface_area".to_string(), "price".to_string()],
            vec![vec![
                table_io::Value::Text("oops".to_string()),
                table_io::Value::Number(120000.0),
            ]],
        )
        .unwrap();

        assert!(matches!(
            features_and_target(&table),
            Err(PipelineError::NonNumericCell { .. })
        ));
    }
}
