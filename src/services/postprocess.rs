//! Optional post-render processing and output staging
//!
//! A post-render hook is a capability: when the backing executable is not
//! installed, detection returns `None` and the site falls back to its own
//! HTML output. That absence is normal, never an error.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use crate::{Error, Result};

/// Capability invoked after the site's own output has been written.
pub trait PostRenderHook {
    fn name(&self) -> &str;

    /// Run the hook against the site root.
    fn run(&self, root: &Path) -> Result<()>;
}

/// Hook backed by an executable looked up on `PATH`.
pub struct CommandHook {
    program: PathBuf,
    name: String,
    envs: Vec<(String, String)>,
}

impl CommandHook {
    /// Look `program` up on `PATH`; `None` means the capability is simply
    /// not installed.
    #[must_use]
    pub fn detect(program: &str) -> Option<Self> {
        let path = env::var_os("PATH")?;
        for dir in env::split_paths(&path) {
            let candidate = dir.join(program);
            if candidate.is_file() {
                debug!("post-render hook found: {}", candidate.display());
                return Some(CommandHook {
                    program: candidate,
                    name: program.to_string(),
                    envs: Vec::new(),
                });
            }
        }
        None
    }

    /// Add an environment variable passed to the subprocess.
    #[must_use]
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }
}

impl PostRenderHook for CommandHook {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, root: &Path) -> Result<()> {
        info!("running post-render hook {} in {}", self.name, root.display());
        let status = Command::new(&self.program)
            .current_dir(root)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::Io(std::io::Error::other(format!(
                "post-render hook {} exited with {status}",
                self.name
            ))))
        }
    }
}

/// Stage the generated tree in version control (`git add <root>`).
pub fn stage_output(root: &Path) -> Result<()> {
    info!("staging output: {}", root.display());
    let status = Command::new("git").arg("add").arg(root).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::Io(std::io::Error::other(format!(
            "git add exited with {status}"
        ))))
    }
}
