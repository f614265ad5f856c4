use super::*;

/// Reader of the node type files.
///
/// A node type file has one record per node: the node name and a
/// small textual type tag, split on the same separator rules of the
/// edge files. Every name in the file must also appear in the edge
/// list the graph is built from.
#[derive(Clone, Debug)]
pub struct NodeFileReader {
    pub(crate) reader: CSVFileReader,
    pub(crate) nodes_column_number: usize,
    pub(crate) node_types_column_number: usize,
}

impl NodeFileReader {
    /// Return new NodeFileReader object.
    ///
    /// # Arguments
    ///
    /// * `path`: String - Path of the node type file.
    pub fn new<S: Into<String>>(path: S) -> Result<NodeFileReader> {
        Ok(NodeFileReader {
            reader: CSVFileReader::new(path)?,
            nodes_column_number: 0,
            node_types_column_number: 1,
        })
    }

    /// Set the column with the node names.
    ///
    /// # Arguments
    ///
    /// * `nodes_column`: Option<String> - The name of the nodes column.
    pub fn set_nodes_column<S: Into<String>>(
        mut self,
        nodes_column: Option<S>,
    ) -> Result<NodeFileReader> {
        if let Some(column) = nodes_column {
            self.nodes_column_number = self.reader.get_column_number(&column.into())?;
        }
        Ok(self)
    }

    /// Set the number of the column with the node names.
    ///
    /// # Arguments
    ///
    /// * `nodes_column_number`: Option<usize> - The number of the nodes column.
    pub fn set_nodes_column_number(
        mut self,
        nodes_column_number: Option<usize>,
    ) -> Result<NodeFileReader> {
        if let Some(column) = nodes_column_number {
            self.validate_column_number(column, "nodes")?;
            self.nodes_column_number = column;
        }
        Ok(self)
    }

    /// Set the column with the node types.
    ///
    /// # Arguments
    ///
    /// * `node_types_column`: Option<String> - The name of the node types column.
    pub fn set_node_types_column<S: Into<String>>(
        mut self,
        node_types_column: Option<S>,
    ) -> Result<NodeFileReader> {
        if let Some(column) = node_types_column {
            self.node_types_column_number = self.reader.get_column_number(&column.into())?;
        }
        Ok(self)
    }

    /// Set the number of the column with the node types.
    ///
    /// # Arguments
    ///
    /// * `node_types_column_number`: Option<usize> - The number of the node types column.
    pub fn set_node_types_column_number(
        mut self,
        node_types_column_number: Option<usize>,
    ) -> Result<NodeFileReader> {
        if let Some(column) = node_types_column_number {
            self.validate_column_number(column, "node types")?;
            self.node_types_column_number = column;
        }
        Ok(self)
    }

    /// Set the separator, by default a tab.
    ///
    /// # Arguments
    ///
    /// * `separator`: Option<String> - The separator to use to split the lines.
    pub fn set_separator<S: Into<String>>(mut self, separator: Option<S>) -> Result<NodeFileReader> {
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
    pub fn set_header(mut self, header: Option<bool>) -> NodeFileReader {
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
    pub fn set_verbose(mut self, verbose: Option<bool>) -> NodeFileReader {
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

    /// Return iterator over the (node name, node type) records of the file.
    pub fn read_lines(&self) -> Result<impl Iterator<Item = Result<(String, String)>> + '_> {
        let expected_elements = self.reader.get_elements_per_line()?;
        if self.nodes_column_number >= expected_elements
            || self.node_types_column_number >= expected_elements
        {
            return Err(format!(
                concat!(
                    "The nodes and node types column numbers passed were {} and {} ",
                    "but the first parsable line has {} values."
                ),
                self.nodes_column_number, self.node_types_column_number, expected_elements
            ));
        }
        Ok(self.reader.read_lines()?.map(move |values| match values {
            Ok(values) => {
                let node_name = values[self.nodes_column_number].to_owned();
                let node_type = values[self.node_types_column_number].to_owned();
                if node_name.is_empty() || node_type.is_empty() {
                    return Err(format!(
                        "Found an empty node name or node type in the file at {}.",
                        self.reader.path
                    ));
                }
                Ok((node_name, node_type))
            }
            Err(e) => Err(e),
        }))
    }
}
