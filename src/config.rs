use crate::error::{ExplainError, ExplainResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Copies over only the values the user typed on the command line,
/// leaving file-provided values in place.
macro_rules! update_if_present {
    ($target:ident, $cli:ident, $matches:ident, $($field:ident),+ $(,)?) => {
        $(
            if $matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                $target.$field = $cli.$field.clone();
            }
        )+
    };
}

/// Everything a config file may set. Each subcommand flattens only the
/// section it reads, and merges its own flags over the file values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub display: DisplayParams,
    pub term_frequency: TermFrequencyDefaults,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayParams {
    /// Record fields shown (and diffed) in the comparison table, in order.
    #[arg(long, default_value = "first_name,surname,dob,birth_place,postcode_fake,occupation")]
    pub compared_fields: String,

    /// Dataset name the waterfall rows are published under in the chart spec.
    #[arg(long, default_value = "data-1")]
    pub chart_dataset: String,

    /// Chart template JSON; the embedded waterfall template is used when unset.
    #[arg(long)]
    pub chart_template: Option<String>,
}

impl Default for DisplayParams {
    fn default() -> Self {
        Self {
            compared_fields: "first_name,surname,dob,birth_place,postcode_fake,occupation"
                .to_string(),
            chart_dataset: "data-1".to_string(),
            chart_template: None,
        }
    }
}

/// Term frequencies assumed when a record leaves its `tf_` field alone.
#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TermFrequencyDefaults {
    #[arg(long, default_value_t = 0.00018837)]
    pub tf_first_name_surname_concat: f64,
    #[arg(long, default_value_t = 0.0003449)]
    pub tf_surname: f64,
    #[arg(long, default_value_t = 0.00018837)]
    pub tf_first_name: f64,
    #[arg(long, default_value_t = 0.00504)]
    pub tf_birth_place: f64,
    #[arg(long, default_value_t = 0.038905)]
    pub tf_occupation: f64,
}

impl Default for TermFrequencyDefaults {
    fn default() -> Self {
        Self {
            tf_first_name_surname_concat: 0.00018837,
            tf_surname: 0.0003449,
            tf_first_name: 0.00018837,
            tf_birth_place: 0.00504,
            tf_occupation: 0.038905,
        }
    }
}

impl TermFrequencyDefaults {
    pub fn merge_from_cli(&mut self, cli: &TermFrequencyDefaults, matches: &ArgMatches) {
        update_if_present!(
            self,
            cli,
            matches,
            tf_first_name_surname_concat,
            tf_surname,
            tf_first_name,
            tf_birth_place,
            tf_occupation,
        );
    }

    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("tf_first_name_surname_concat", self.tf_first_name_surname_concat),
            ("tf_surname", self.tf_surname),
            ("tf_first_name", self.tf_first_name),
            ("tf_birth_place", self.tf_birth_place),
            ("tf_occupation", self.tf_occupation),
        ]
    }
}

impl DisplayParams {
    pub fn merge_from_cli(&mut self, cli: &DisplayParams, matches: &ArgMatches) {
        update_if_present!(self, cli, matches, compared_fields, chart_dataset, chart_template);
    }

    pub fn get_compared_fields(&self) -> Vec<String> {
        self.compared_fields
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ExplainResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ExplainError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ExplainError::Config(format!("Failed to parse config '{}': {}", path.display(), e))
        })
    }

    pub fn validate(&self) -> ExplainResult<()> {
        if self.display.get_compared_fields().is_empty() {
            return Err(ExplainError::Config(
                "compared_fields must name at least one field".to_string(),
            ));
        }
        if self.display.chart_dataset.trim().is_empty() {
            return Err(ExplainError::Config("chart_dataset must not be empty".to_string()));
        }
        for (name, value) in self.term_frequency.entries() {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ExplainError::Config(format!(
                    "{} must lie in (0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
