use super::*;
use itertools::Itertools;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Reader for the line-oriented tabular files the graph is loaded from.
///
/// The struct only keeps the reading settings; every call to
/// [`CSVFileReader::read_lines`] opens the file again, so the loaders
/// can stream the same file multiple times.
#[derive(Clone, Debug)]
pub struct CSVFileReader {
    pub(crate) path: String,
    pub(crate) verbose: bool,
    pub(crate) separator: String,
    pub(crate) header: bool,
}

impl CSVFileReader {
    /// Return new CSVFileReader object.
    ///
    /// # Arguments
    ///
    /// * `path`: String - Path of the file to read.
    pub fn new<S: Into<String>>(path: S) -> Result<CSVFileReader> {
        let path = path.into();
        match File::open(&path) {
            Ok(_) => Ok(CSVFileReader {
                path,
                verbose: false,
                separator: "\t".to_string(),
                header: true,
            }),
            Err(_) => Err(format!("Cannot open the file at {}.", path)),
        }
    }

    /// Read the first line of the file and return its fields.
    pub fn get_header(&self) -> Result<Vec<String>> {
        let file = File::open(&self.path).map_err(|_| format!("Cannot open the file at {}.", self.path))?;
        match BufReader::new(file).lines().next() {
            Some(Ok(line)) => Ok(line
                .split(&self.separator)
                .map(|element| element.to_string())
                .collect()),
            _ => Err(format!("The file at {} has no parsable lines.", self.path)),
        }
    }

    /// Return the number of the column with the given name.
    ///
    /// # Arguments
    ///
    /// * `column_name`: &str - Name of the column to look for in the header.
    pub fn get_column_number(&self, column_name: &str) -> Result<usize> {
        if !self.header {
            return Err(concat!(
                "The column was given by name but the file ",
                "was declared not to have an header row."
            )
            .to_string());
        }
        let header = self.get_header()?;
        match header.iter().position(|candidate| candidate == column_name) {
            Some(column_number) => Ok(column_number),
            None => Err(format!(
                "The column {} is not present in the header [{}] of the file at {}.",
                column_name,
                header.iter().join(", "),
                self.path
            )),
        }
    }

    /// Return the number of fields of the first parsable line.
    pub fn get_elements_per_line(&self) -> Result<usize> {
        Ok(self.get_header()?.len())
    }

    /// Return iterator over the records of the file.
    ///
    /// Every non-empty line is split on the configured separator and
    /// validated to have the same number of fields as the first line;
    /// a mismatch is a malformed file and stops the load.
    pub fn read_lines(&self) -> Result<impl Iterator<Item = Result<Vec<String>>> + '_> {
        let expected_elements = self.get_elements_per_line()?;
        let file = File::open(&self.path).map_err(|_| format!("Cannot open the file at {}.", self.path))?;
        let rows_to_skip = if self.header { 1 } else { 0 };
        Ok(BufReader::new(file)
            .lines()
            .skip(rows_to_skip)
            .enumerate()
            .filter_map(move |(line_number, line)| match line {
                Ok(line) => {
                    if line.is_empty() {
                        return None;
                    }
                    let elements: Vec<String> = line
                        .split(&self.separator)
                        .map(|element| element.to_string())
                        .collect();
                    if elements.len() != expected_elements {
                        return Some(Err(format!(
                            concat!(
                                "Found line {} with {} values while the first line ",
                                "of the file at {} has {} values. ",
                                "All the lines of the file must have the same number of values."
                            ),
                            line_number,
                            elements.len(),
                            self.path,
                            expected_elements
                        )));
                    }
                    Some(Ok(elements))
                }
                Err(_) => Some(Err(format!(
                    "Cannot read line {} of the file at {}.",
                    line_number, self.path
                ))),
            }))
    }
}
