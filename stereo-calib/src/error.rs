use thiserror::Error;

/// Everything that can go wrong while reading a calibration file or deriving
/// stereo geometry from its contents. Calibration correctness is a
/// precondition of depth reconstruction, so these are surfaced to the caller
/// immediately rather than recovered from.
#[derive(Error, Debug)]
pub enum Error {
    /// The calibration file could not be opened or read.
    #[error("unable to read calibration file: {0}")]
    Io(#[from] std::io::Error),
    /// A non-empty line had no colon separating the key from its values.
    #[error("calibration line {line} contains no colon")]
    MalformedLine { line: usize },
    /// A key required for the stereo derivation was not present.
    #[error("required calibration key {key:?} is missing")]
    MissingKey { key: String },
    /// A key's numeric sequence had the wrong length to reshape.
    #[error("calibration key {key:?} has {actual} values where {expected} are required")]
    BadShape {
        key: String,
        expected: usize,
        actual: usize,
    },
}
