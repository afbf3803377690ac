use std::fs;
use std::io::{self, Error, Read};
use std::path::Path;

use crate::list::Operation;

/// Loads a YAML sequence of operations from `path`, or from stdin when `path` is `-`.
pub(crate) fn load(path: &Path) -> Result<Vec<Operation>, Error> {
    let input = if path == Path::new("-") {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        input
    } else {
        fs::read_to_string(path)?
    };
    parse(&input).map_err(Error::other)
}

pub(crate) fn parse(input: &str) -> Result<Vec<Operation>, serde_yaml::Error> {
    // `serde_yaml` rejects an empty document when expecting a sequence.
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(input)
}
