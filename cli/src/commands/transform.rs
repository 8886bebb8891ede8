//! Transform command implementation - re-emit records with case folding

use anyhow::{Context, Result};
use fastago_core::{decode, drain, Case, Rewrite};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::CliError;
use crate::streams::{open_input, open_output};

pub fn execute(
    config: &Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    case: Case,
    line_width: Option<isize>,
) -> Result<()> {
    let line_width = line_width.unwrap_or(config.output.line_width);
    log::info!("Rewriting records ({:?}, line width {})", case, line_width);

    let reader = open_input(input.as_deref())?;
    let writer = open_output(output.as_deref())?;

    let stream = decode(reader, &config.decoder_options()).map_err(CliError::from)?;
    drain(stream, Rewrite::new(writer, line_width, Some(case)))
        .map_err(CliError::from)
        .context("Failed to transform records")?;

    log::info!("Transform completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run(input: &str, case: Case, line_width: Option<isize>) -> (Result<()>, String) {
        let dir = TempDir::new().unwrap();
        let in_path = dir.path().join("in.fa");
        let out_path = dir.path().join("out.fa");
        std::fs::write(&in_path, input).unwrap();

        let res = execute(
            &Config::default(),
            Some(in_path),
            Some(out_path.clone()),
            case,
            line_width,
        );
        let out = std::fs::read_to_string(&out_path).unwrap_or_default();
        (res, out)
    }

    #[test]
    fn test_lower_wrapped() {
        let (res, out) = run(">a desc1\nACGT\nAC\n>b\nG\n", Case::Lower, Some(3));
        assert!(res.is_ok());
        assert_eq!(out, ">a\nacg\ntac\n>b\ng\n");
    }

    #[test]
    fn test_upper_unwrapped() {
        let (res, out) = run(">x\nacg\ntac\n", Case::Upper, Some(-1));
        assert!(res.is_ok());
        assert_eq!(out, ">x\nACGTAC\n");
    }

    #[test]
    fn test_default_width_from_config() {
        let seq = "A".repeat(130);
        let (res, out) = run(&format!(">long\n{seq}\n"), Case::Lower, None);
        assert!(res.is_ok());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].len(), 60);
        assert_eq!(lines[3].len(), 10);
    }

    #[test]
    fn test_records_before_failure_are_kept() {
        let (res, out) = run(">a\nAC\n>\nGG\n", Case::Lower, Some(0));
        assert!(res.is_err());
        assert_eq!(out, ">a\nac\n");
    }
}
