use std::collections::BTreeMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::*;
use nalgebra::{Matrix3, Matrix3x4};

use crate::Error;

/// The raw numeric contents of a calibration file: an ordered numeric
/// sequence for every key that parses cleanly.
///
/// The file format is one entry per line, `KEY: v1 v2 v3 ...`. The only
/// non-float values in these files are dates, so any line containing a token
/// that fails to parse as a float is dropped whole rather than treated as an
/// error. A line with the same key as an earlier one overwrites it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationRecord {
    entries: BTreeMap<String, Vec<f64>>,
}

impl CalibrationRecord {
    /// Reads and parses the calibration file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        debug!("reading calibration from {}", path.display());
        let file = std::fs::File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses calibration entries from any buffered reader.
    ///
    /// ```
    /// use stereo_calib::CalibrationRecord;
    /// let record = CalibrationRecord::from_reader(
    ///     "calib_time: 09-Jan-2012 13:57:47\nS_rect_02: 1.242000e+03 3.750000e+02\n".as_bytes(),
    /// ).unwrap();
    /// assert_eq!(record.values("S_rect_02"), Some(&[1242.0, 375.0][..]));
    /// // The date line fails float parsing and is silently dropped.
    /// assert_eq!(record.values("calib_time"), None);
    /// ```
    pub fn from_reader(reader: impl BufRead) -> Result<Self, Error> {
        let mut entries = BTreeMap::new();
        for (ix, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let (key, rest) = line
                .split_once(':')
                .ok_or(Error::MalformedLine { line: ix + 1 })?;
            match rest
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<Vec<f64>, _>>()
            {
                Ok(values) => {
                    entries.insert(key.trim().to_owned(), values);
                }
                Err(_) => trace!("skipping non-numeric calibration entry {:?}", key.trim()),
            }
        }
        Ok(Self { entries })
    }

    /// The numeric sequence stored under `key`, if the key was present and
    /// numeric.
    pub fn values(&self, key: &str) -> Option<&[f64]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Like [`CalibrationRecord::values`], but a missing key is an error.
    pub fn require(&self, key: &str) -> Result<&[f64], Error> {
        self.values(key).ok_or_else(|| Error::MissingKey {
            key: key.to_owned(),
        })
    }

    /// Reshapes the 9-element sequence under `key` into a row-major 3x3
    /// matrix, such as a rectifying rotation `R_rect_0x`.
    pub fn matrix3(&self, key: &str) -> Result<Matrix3<f64>, Error> {
        let values = self.require(key)?;
        if values.len() != 9 {
            return Err(Error::BadShape {
                key: key.to_owned(),
                expected: 9,
                actual: values.len(),
            });
        }
        Ok(Matrix3::from_row_slice(values))
    }

    /// Reshapes the 12-element sequence under `key` into a row-major 3x4
    /// matrix, such as a rectified projection `P_rect_0x`.
    pub fn matrix3x4(&self, key: &str) -> Result<Matrix3x4<f64>, Error> {
        let values = self.require(key)?;
        if values.len() != 12 {
            return Err(Error::BadShape {
                key: key.to_owned(),
                expected: 12,
                actual: values.len(),
            });
        }
        Ok(Matrix3x4::from_row_slice(values))
    }

    /// Number of numeric entries in the record.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record holds no numeric entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
