//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::Result;
use crate::output::Formatter;
use attendsure_extractor::extract;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, formatter: &Formatter) -> Result<()> {
    let raw = read_payload(args.file.as_deref())?;
    println!("{}", render_payload(&raw, formatter)?);
    Ok(())
}

/// Read the payload from a file, or from stdin when no file is given.
pub fn read_payload(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

/// Normalize a payload and format the outcome.
pub fn render_payload(raw: &str, formatter: &Formatter) -> Result<String> {
    let outcome = extract(Some(raw));
    formatter.format_outcome(outcome.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_payload_from_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), r#"{"analysisStructuredData": {"reason": "ok"}}"#).unwrap();

        let raw = read_payload(Some(file.path())).unwrap();
        assert!(raw.contains("analysisStructuredData"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_payload(Some(Path::new("/nonexistent/payload.json")));
        assert!(matches!(result, Err(crate::error::CliError::Io(_))));
    }

    #[test]
    fn test_render_payload() {
        let quiet = Formatter::new(OutputFormat::Quiet, false);
        let raw = r#"{"structuredOutputs": {"x": {"result": {"call_success": "false"}}}}"#;
        assert_eq!(render_payload(raw, &quiet).unwrap(), "false");
        assert_eq!(render_payload("not json", &quiet).unwrap(), "unknown");

        let json = Formatter::new(OutputFormat::Json, false);
        let output = render_payload(raw, &json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["call_success"], false);
        assert_eq!(value["questions"], serde_json::json!([]));
    }
}
