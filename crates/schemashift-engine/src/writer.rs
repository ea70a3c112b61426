//! Script rendering for compare results

use schemashift_core::{CompareResult, OutputConfig};

/// Joins compare results into one executable script
#[derive(Debug, Clone)]
pub struct ComparisonWriter {
    include_headers: bool,
}

impl ComparisonWriter {
    pub fn new() -> Self {
        Self { include_headers: true }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        Self {
            include_headers: output.include_headers,
        }
    }

    /// Toggle the `-- NEW TABLE Orders` line before each result
    pub fn with_headers(mut self, include_headers: bool) -> Self {
        self.include_headers = include_headers;
        self
    }

    /// Header comment naming the action and object
    pub fn header(result: &CompareResult) -> String {
        format!(
            "-- {} {} {}",
            result.result_type.header_verb(),
            result.object_type,
            result.display_name()
        )
    }

    /// Results in order, separated by a blank line
    pub fn write(&self, results: &[CompareResult]) -> String {
        let blocks: Vec<String> = results
            .iter()
            .filter(|r| !r.script.trim().is_empty())
            .map(|r| {
                if self.include_headers {
                    format!("{}\n{}", Self::header(r), r.script.trim_end())
                } else {
                    r.script.trim_end().to_string()
                }
            })
            .collect();

        if blocks.is_empty() {
            return String::new();
        }

        let mut script = blocks.join("\n\n");
        script.push('\n');
        script
    }
}

impl Default for ComparisonWriter {
    fn default() -> Self {
        Self::new()
    }
}
