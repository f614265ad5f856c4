use super::*;

fn parse_edge_weight(candidate: &str) -> Result<WeightT> {
    match candidate.parse::<WeightT>() {
        Ok(weight) => {
            if weight.is_finite() && weight > 0.0 {
                Ok(weight)
            } else {
                Err(format!(
                    "The value {} parsed as a weight as {} is either infinite, NaN or non-positive.",
                    candidate, weight
                ))
            }
        }
        Err(_) => Err(format!("Cannot parse weight {} as a float.", candidate)),
    }
}

/// Reader of the edge list files.
///
/// Wraps a [`CSVFileReader`] with the roles of the columns: which one
/// holds the source labels, the destination labels and, optionally,
/// the weights and the edge types. Columns can be given either by
/// name, when the file has an header row, or by 0-based number.
#[derive(Clone, Debug)]
pub struct EdgeFileReader {
    pub(crate) reader: CSVFileReader,
    pub(crate) sources_column_number: usize,
    pub(crate) destinations_column_number: usize,
    pub(crate) weights_column_number: Option<usize>,
    pub(crate) edge_types_column_number: Option<usize>,
    pub(crate) default_weight: WeightT,
    pub(crate) default_edge_type: Option<String>,
}

impl EdgeFileReader {
    /// Return new EdgeFileReader object.
    ///
    /// # Arguments
    ///
    /// * `path`: String - Path of the edge file.
    pub fn new<S: Into<String>>(path: S) -> Result<EdgeFileReader> {
        Ok(EdgeFileReader {
            reader: CSVFileReader::new(path)?,
            sources_column_number: 0,
            destinations_column_number: 1,
            weights_column_number: None,
            edge_types_column_number: None,
            default_weight: 1.0,
            default_edge_type: None,
        })
    }

    /// Set the column with the source node names.
    ///
    /// # Arguments
    ///
    /// * `sources_column`: Option<String> - The name of the sources column.
    pub fn set_sources_column<S: Into<String>>(
        mut self,
        sources_column: Option<S>,
    ) -> Result<EdgeFileReader> {
        if let Some(column) = sources_column {
            self.sources_column_number = self.reader.get_column_number(&column.into())?;
        }
        Ok(self)
    }

    /// Set the number of the column with the source node names.
    ///
    /// # Arguments
    ///
    /// * `sources_column_number`: Option<usize> - The number of the sources column.
    pub fn set_sources_column_number(
        mut self,
        sources_column_number: Option<usize>,
    ) -> Result<EdgeFileReader> {
        if let Some(column) = sources_column_number {
            self.validate_column_number(column, "sources")?;
            self.sources_column_number = column;
        }
        Ok(self)
    }

    /// Set the column with the destination node names.
    ///
    /// # Arguments
    ///
    /// * `destinations_column`: Option<String> - The name of the destinations column.
    pub fn set_destinations_column<S: Into<String>>(
        mut self,
        destinations_column: Option<S>,
    ) -> Result<EdgeFileReader> {
        if let Some(column) = destinations_column {
            self.destinations_column_number = self.reader.get_column_number(&column.into())?;
        }
        Ok(self)
    }

    /// Set the number of the column with the destination node names.
    ///
    /// # Arguments
    ///
    /// * `destinations_column_number`: Option<usize> - The number of the destinations column.
    pub fn set_destinations_column_number(
        mut self,
        destinations_column_number: Option<usize>,
    ) -> Result<EdgeFileReader> {
        if let Some(column) = destinations_column_number {
            self.validate_column_number(column, "destinations")?;
            self.destinations_column_number = column;
        }
        Ok(self)
    }

    /// Set the column with the edge weights.
    ///
    /// # Arguments
    ///
    /// * `weights_column`: Option<String> - The name of the weights column.
    pub fn set_weights_column<S: Into<String>>(
        mut self,
        weights_column: Option<S>,
    ) -> Result<EdgeFileReader> {
        if let Some(column) = weights_column {
            self.weights_column_number = Some(self.reader.get_column_number(&column.into())?);
        }
        Ok(self)
    }

    /// Set the number of the column with the edge weights.
    ///
    /// # Arguments
    ///
    /// * `weights_column_number`: Option<usize> - The number of the weights column.
    pub fn set_weights_column_number(
        mut self,
        weights_column_number: Option<usize>,
    ) -> Result<EdgeFileReader> {
        if let Some(column) = weights_column_number {
            self.validate_column_number(column, "weights")?;
            self.weights_column_number = Some(column);
        }
        Ok(self)
    }

    /// Set the column with the edge types.
    ///
    /// # Arguments
    ///
    /// * `edge_types_column`: Option<String> - The name of the edge types column.
    pub fn set_edge_types_column<S: Into<String>>(
        mut self,
        edge_types_column: Option<S>,
    ) -> Result<EdgeFileReader> {
        if let Some(column) = edge_types_column {
            self.edge_types_column_number = Some(self.reader.get_column_number(&column.into())?);
        }
        Ok(self)
    }

    /// Set the number of the column with the edge types.
    ///
    /// # Arguments
    ///
    /// * `edge_types_column_number`: Option<usize> - The number of the edge types column.
    pub fn set_edge_types_column_number(
        mut self,
        edge_types_column_number: Option<usize>,
    ) -> Result<EdgeFileReader> {
        if let Some(column) = edge_types_column_number {
            self.validate_column_number(column, "edge types")?;
            self.edge_types_column_number = Some(column);
        }
        Ok(self)
    }

    /// Set the weight to use for the edges without one.
    ///
    /// # Arguments
    ///
    /// * `default_weight`: Option<WeightT> - The default weight, must be finite and positive.
    pub fn set_default_weight(mut self, default_weight: Option<WeightT>) -> Result<EdgeFileReader> {
        if let Some(weight) = default_weight {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(format!(
                    "The default weight {} is not a strictly positive finite number.",
                    weight
                ));
            }
            self.default_weight = weight;
        }
        Ok(self)
    }

    /// Set the edge type to use for the edges without one.
    ///
    /// # Arguments
    ///
    /// * `default_edge_type`: Option<String> - The default edge type.
    pub fn set_default_edge_type<S: Into<String>>(
        mut self,
        default_edge_type: Option<S>,
    ) -> EdgeFileReader {
        self.default_edge_type = default_edge_type.map(|default| default.into());
        self
    }

    /// Set the separator, by default a tab.
    ///
    /// # Arguments
    ///
    /// * `separator`: Option<String> - The separator to use to split the lines.
    pub fn set_separator<S: Into<String>>(mut self, separator: Option<S>) -> Result<EdgeFileReader> {
        if let Some(separator) = separator {
            let separator = separator.into();
            if separator.is_empty() {
                return Err("The separator cannot be empty.".to_owned());
            }
            self.reader.separator = separator;
        }
        Ok(self)
    }

    /// Set whether the file has an header row.
    ///
    /// # Arguments
    ///
    /// * `header`: Option<bool> - Whether to expect an header row.
    pub fn set_header(mut self, header: Option<bool>) -> EdgeFileReader {
        if let Some(header) = header {
            self.reader.header = header;
        }
        self
    }

    /// Set the verbosity.
    ///
    /// # Arguments
    ///
    /// * `verbose`: Option<bool> - Whether to show the loading bar.
    pub fn set_verbose(mut self, verbose: Option<bool>) -> EdgeFileReader {
        if let Some(verbose) = verbose {
            self.reader.verbose = verbose;
        }
        self
    }

    fn validate_column_number(&self, column_number: usize, role: &str) -> Result<()> {
        let expected_elements = self.reader.get_elements_per_line()?;
        if column_number >= expected_elements {
            return Err(format!(
                concat!(
                    "The {} column number passed was {} but ",
                    "the first parsable line has {} values."
                ),
                role, column_number, expected_elements
            ));
        }
        Ok(())
    }

    /// Parse a single line already split on the separator.
    ///
    /// # Arguments
    ///
    /// * `values`: Vec<String> - Values of the line to be parsed.
    fn parse_edge_line(
        &self,
        values: Vec<String>,
    ) -> Result<(String, String, Option<String>, WeightT)> {
        let source_node_name = values[self.sources_column_number].to_owned();
        let destination_node_name = values[self.destinations_column_number].to_owned();
        if source_node_name.is_empty() || destination_node_name.is_empty() {
            return Err(format!(
                "Found an edge with an empty source or destination name in the file at {}.",
                self.reader.path
            ));
        }
        let edge_type = match self.edge_types_column_number {
            None => None,
            Some(column_number) => {
                let candidate = values[column_number].to_owned();
                if !candidate.is_empty() {
                    Some(candidate)
                } else if let Some(default) = &self.default_edge_type {
                    Some(default.clone())
                } else {
                    return Err(format!(
                        concat!(
                            "Found an empty edge type for the edge between {} and {} ",
                            "but no default edge type to use was provided."
                        ),
                        source_node_name, destination_node_name
                    ));
                }
            }
        };
        let weight = match self.weights_column_number {
            None => self.default_weight,
            Some(column_number) => {
                let candidate = &values[column_number];
                if candidate.is_empty() {
                    self.default_weight
                } else {
                    parse_edge_weight(candidate)?
                }
            }
        };
        Ok((source_node_name, destination_node_name, edge_type, weight))
    }

    /// Return iterator over the parsed records of the edge file.
    pub fn read_lines(
        &self,
    ) -> Result<impl Iterator<Item = Result<(String, String, Option<String>, WeightT)>> + '_> {
        let expected_elements = self.reader.get_elements_per_line()?;
        for (column_number, role) in &[
            (Some(self.sources_column_number), "sources"),
            (Some(self.destinations_column_number), "destinations"),
            (self.weights_column_number, "weights"),
            (self.edge_types_column_number, "edge types"),
        ] {
            if let Some(column_number) = column_number {
                if *column_number >= expected_elements {
                    return Err(format!(
                        concat!(
                            "The {} column number passed was {} but ",
                            "the first parsable line has {} values."
                        ),
                        role, column_number, expected_elements
                    ));
                }
            }
        }
        Ok(self.reader.read_lines()?.map(move |values| match values {
            Ok(values) => self.parse_edge_line(values),
            Err(e) => Err(e),
        }))
    }
}
