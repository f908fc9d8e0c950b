//! Load claimant profiles from JSON

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::ClaimantProfile;
use crate::error::{CalculationError, EngineResult};

fn parse_error(err: serde_json::Error) -> CalculationError {
    CalculationError::invalid("profile", err.to_string())
}

fn open_profile(path: &Path) -> EngineResult<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(|err| {
        CalculationError::invalid("profile", format!("cannot read {}: {}", path.display(), err))
    })
}

/// Load a single profile from any reader
pub fn load_profile_from_reader<R: Read>(reader: R) -> EngineResult<ClaimantProfile> {
    serde_json::from_reader(reader).map_err(parse_error)
}

/// Load a JSON array of profiles from any reader
pub fn load_profiles_from_reader<R: Read>(reader: R) -> EngineResult<Vec<ClaimantProfile>> {
    serde_json::from_reader(reader).map_err(parse_error)
}

/// Load a single profile from a JSON file
pub fn load_profile<P: AsRef<Path>>(path: P) -> EngineResult<ClaimantProfile> {
    load_profile_from_reader(open_profile(path.as_ref())?)
}

/// Load a JSON array of profiles from a file
pub fn load_profiles<P: AsRef<Path>>(path: P) -> EngineResult<Vec<ClaimantProfile>> {
    load_profiles_from_reader(open_profile(path.as_ref())?)
}
