/*!
# Reading Configurations from JSON

Fields missing from the document take their value from
[`AlgorithmConfig::default`](crate::core::AlgorithmConfig). The loaded config is raw:
it is sanitized when it reaches the state machine.
*/

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::core::AlgorithmConfig;

/**
Reads an [`AlgorithmConfig`] from the JSON file at `path`.

# Examples

```rust
use mh_explorer::io::json::load_config;

std::fs::write("/tmp/mh_config.json", r#"{"total_samples": 250, "burn_in_samples": 50}"#)?;
let config = load_config("/tmp/mh_config.json")?;
assert_eq!(config.total_target(), 250);
assert_eq!(config.burn_in_target(), 50);
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AlgorithmConfig, Box<dyn Error>> {
    let reader = BufReader::new(File::open(path)?);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

/// Writes `config` to `path` as pretty-printed JSON.
pub fn save_config<P: AsRef<Path>>(config: &AlgorithmConfig, path: P) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}
