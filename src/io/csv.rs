/*!
# Saving NIG Draws to CSV

This module writes batches of normal-inverse-gamma draws to CSV files. Enable via the `csv`
feature (on by default).
*/

use crate::sampler::{SIGMA2_COL, X_COL};
use ndarray::Array2;
use std::error::Error;
use std::fs::File;

use csv::Writer;

/**
Saves a batch of draws as a CSV file.

The data is expected to be in a shape of **draw × 2**, with the mean `x` in column 0 and the
variance `sigma2` in column 1, as returned by [`crate::sampler::NigSampler::sample`].

The resulting CSV file will have:
- A header row `draw,x,sigma2`.
- One row per draw holding its index followed by both values.

# Arguments

* `draws` - An `Array2<T>` of shape `[n, 2]`.
* `filename` - The file path where the CSV data will be written.

# Returns

Returns `Ok(())` if successful, or an error if the array does not have two columns or any I/O
or CSV formatting issue occurs.

# Examples

```rust
use nig_conjugate::distributions::NormalInverseGamma;
use nig_conjugate::io::csv::save_csv;
use nig_conjugate::sampler::NigSampler;

let prior = NormalInverseGamma::new(0.0, 1.0, 2.0, 2.0)?;
let draws = NigSampler::new(prior)?.set_seed(1).sample(100);

save_csv(&draws, "/tmp/nig_draws.csv")?;
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/
pub fn save_csv<T: std::fmt::Display>(
    draws: &Array2<T>,
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    if draws.ncols() != 2 {
        return Err(format!(
            "Expected draws with 2 columns (x, sigma2), got shape {:?}",
            draws.shape()
        )
        .into());
    }
    let mut wtr = Writer::from_writer(File::create(filename)?);
    wtr.write_record(["draw", "x", "sigma2"])?;

    for (idx, row) in draws.rows().into_iter().enumerate() {
        wtr.write_record([
            idx.to_string(),
            row[X_COL].to_string(),
            row[SIGMA2_COL].to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::Reader;
    use ndarray::arr2;
    use std::fs;
    use tempfile::NamedTempFile;

    /// Test saving zero draws (header only).
    #[test]
    fn test_save_csv_empty_data() {
        let data = Array2::<f64>::zeros((0, 2));
        let file = NamedTempFile::new().expect("Could not create temp file");
        let filename = file.path().to_str().unwrap();

        let result = save_csv(&data, filename);
        assert!(result.is_ok(), "Saving empty data to CSV failed: {:?}", result);

        let contents = fs::read_to_string(filename).unwrap();
        assert_eq!(contents.trim(), "draw,x,sigma2");
    }

    #[test]
    fn test_save_csv_rows() {
        let data = arr2(&[[1.5, 0.25], [-2.0, 3.0]]);
        let file = NamedTempFile::new().expect("Could not create temp file");
        let filename = file.path().to_str().unwrap();

        save_csv(&data, filename).unwrap();

        let contents = fs::read_to_string(filename).unwrap();
        let expected = "\
draw,x,sigma2
0,1.5,0.25
1,-2,3";
        assert_eq!(contents.trim(), expected);
    }

    #[test]
    fn test_save_csv_rejects_wrong_width() {
        let data = arr2(&[[1.0, 2.0, 3.0]]);
        let file = NamedTempFile::new().expect("Could not create temp file");
        let filename = file.path().to_str().unwrap();
        assert!(save_csv(&data, filename).is_err());
    }

    #[test]
    fn test_save_csv_sampled_draws_parse_back() -> Result<(), Box<dyn std::error::Error>> {
        use crate::distributions::NormalInverseGamma;
        use crate::sampler::NigSampler;

        let prior = NormalInverseGamma::new(0.0, 1.0, 2.0, 2.0)?;
        let draws = NigSampler::new(prior)?.set_seed(5).sample(25);
        let file = NamedTempFile::new()?;
        let filename = file.path().to_str().unwrap();
        save_csv(&draws, filename)?;

        let mut rdr = Reader::from_path(filename)?;
        let records: Vec<_> = rdr.records().collect::<Result<_, _>>()?;
        assert_eq!(records.len(), 25);
        for (i, record) in records.iter().enumerate() {
            let x: f64 = record[1].parse()?;
            let sigma2: f64 = record[2].parse()?;
            assert_eq!(x, draws[(i, X_COL)]);
            assert_eq!(sigma2, draws[(i, SIGMA2_COL)]);
        }
        Ok(())
    }
}
