//! Rendering of resolved pointers for the command-line tool.

use anyhow::Result;

use crate::config::OutputFormat;
use crate::pointer::Resolved;

/// Renders `results` found in `source` in the requested format.
///
/// Text output is one `SOURCE:LINE:COLUMN: VALUE` line per result, the
/// shape compilers use for diagnostics. JSON and YAML output serialize the
/// result list.
pub fn render(source: &str, results: &[Resolved], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(results
            .iter()
            .map(|r| format!("{}:{}:{}: {}\n", source, r.line, r.column, r.value))
            .collect()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(results)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(results)?),
    }
}
