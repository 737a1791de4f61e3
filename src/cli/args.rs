//! CLI argument parsing

use crate::services::source::{DEFAULT_ENDPOINT, DEFAULT_PASSWORD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Html,
    Markdown,
}

#[derive(Debug, Clone)]
pub struct CliArgs {
    pub dir: String,
    pub endpoint: String,
    pub password: String,
    /// Fixed (rejected, succeeded, expired) counters instead of querying
    /// the router.
    pub offline: Option<(u64, u64, u64)>,
    /// Forced output mode; `None` selects markdown when a post-processor
    /// is installed, HTML otherwise.
    pub mode: Option<OutputMode>,
    pub stage: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            offline: None,
            mode: None,
            stage: true,
        }
    }
}

/// Parse command line arguments (expects the full argv including the
/// program name).
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--dir" => {
                i += 1;
                if i >= args.len() {
                    return Err("--dir requires a directory path".to_string());
                }
                parsed.dir.clone_from(&args[i]);
            }
            "--endpoint" => {
                i += 1;
                if i >= args.len() {
                    return Err("--endpoint requires a URL".to_string());
                }
                parsed.endpoint.clone_from(&args[i]);
            }
            "--password" => {
                i += 1;
                if i >= args.len() {
                    return Err("--password requires a value".to_string());
                }
                parsed.password.clone_from(&args[i]);
            }
            "--offline" => {
                i += 1;
                if i >= args.len() {
                    return Err("--offline requires three comma-separated counters".to_string());
                }
                parsed.offline = Some(parse_counters(&args[i])?);
            }
            "--markdown" => {
                parsed.mode = Some(OutputMode::Markdown);
            }
            "--html" => {
                parsed.mode = Some(OutputMode::Html);
            }
            "--no-stage" => {
                parsed.stage = false;
            }
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    Ok(parsed)
}

fn parse_counters(value: &str) -> Result<(u64, u64, u64), String> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 3 {
        return Err("--offline expects REJECTED,SUCCEEDED,EXPIRED".to_string());
    }
    let mut counters = [0u64; 3];
    for (slot, part) in counters.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|_| format!("--offline: '{part}' is not a non-negative integer"))?;
    }
    Ok((counters[0], counters[1], counters[2]))
}
