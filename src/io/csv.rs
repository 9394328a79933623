/*!
# Saving Chain Histories to CSV

Enable via the `csv` feature.
*/

use csv::Writer;
use std::error::Error;
use std::fs::File;
use std::path::Path;

use crate::state::AlgorithmState;

/**
Writes every recorded sample of `state` to a CSV file, burn-in first.

The file has a header row `index,is_burn_in,slope,intercept,sigma` followed by one
row per [`SampleRecord`](crate::state::SampleRecord).

# Examples

```rust
use mh_explorer::core::AlgorithmConfig;
use mh_explorer::io::csv::save_csv;
use mh_explorer::sampler::Sampler;

let config = AlgorithmConfig { total_samples: 20.0, ..AlgorithmConfig::default() };
let mut sampler = Sampler::new(&config).set_seed(1);
sampler.run_auto();
save_csv(sampler.state(), "/tmp/mh_chain.csv")?;
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/
pub fn save_csv<P: AsRef<Path>>(state: &AlgorithmState, path: P) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_writer(File::create(path)?);
    wtr.write_record(["index", "is_burn_in", "slope", "intercept", "sigma"])?;

    let records = state
        .burn_in_samples
        .iter()
        .chain(state.accepted_samples.iter());
    for (i, record) in records.enumerate() {
        let p = record.params;
        wtr.write_record(&[
            i.to_string(),
            record.is_burn_in.to_string(),
            p.slope.to_string(),
            p.intercept.to_string(),
            p.sigma.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AlgorithmConfig;
    use crate::sampler::Sampler;
    use tempfile::NamedTempFile;

    #[test]
    fn writes_one_row_per_sample() {
        let config = AlgorithmConfig {
            total_samples: 6.0,
            burn_in_samples: 3.0,
            data_points: 5.0,
            ..AlgorithmConfig::default()
        };
        let mut sampler = Sampler::new(&config).set_seed(42);
        sampler.run_auto();

        let file = NamedTempFile::new().expect("Could not create temp file");
        save_csv(sampler.state(), file.path()).expect("Expecting saving data to succeed");

        let mut rdr = csv::Reader::from_path(file.path()).unwrap();
        let header = rdr.headers().unwrap().clone();
        assert_eq!(
            header.iter().collect::<Vec<_>>(),
            vec!["index", "is_burn_in", "slope", "intercept", "sigma"]
        );
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 9);
        assert_eq!(&rows[0][1], "true");
        assert_eq!(&rows[2][1], "true");
        assert_eq!(&rows[3][1], "false");

        let first = sampler.state().burn_in_samples[0].params;
        let slope: f64 = rows[0][2].parse().unwrap();
        assert_eq!(slope, first.slope);
    }
}
