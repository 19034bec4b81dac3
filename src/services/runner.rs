use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

use crate::domain::models::{ModuleRecord, RunOutcome};

/// Entrypoint file a module must carry to be bootstrapped.
pub const INIT_ENTRYPOINT: &str = "__init__.py";

#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("initializer failed for module '{module}': {detail}")]
    Failed { module: String, detail: String },
    #[error("initializer timed out for module '{module}' after {seconds}s")]
    TimedOut { module: String, seconds: u64 },
    #[error("could not launch initializer for module '{module}': {source}")]
    Spawn {
        module: String,
        #[source]
        source: std::io::Error,
    },
}

/// Capability seam for running one entrypoint script. The real
/// implementation shells out; tests substitute a recorder.
pub trait Launcher {
    fn execute(
        &self,
        entry: &Path,
        workdir: &Path,
        timeout: Option<Duration>,
    ) -> std::io::Result<Output>;
}

/// Runs entrypoints through the host language runtime (python3 unless
/// overridden), blocking until the child exits or the timeout expires.
pub struct HostLauncher {
    pub interpreter: String,
}

impl HostLauncher {
    pub fn new(interpreter: &str) -> HostLauncher {
        HostLauncher {
            interpreter: interpreter.to_string(),
        }
    }
}

impl Launcher for HostLauncher {
    fn execute(
        &self,
        entry: &Path,
        workdir: &Path,
        timeout: Option<Duration>,
    ) -> std::io::Result<Output> {
        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(entry).current_dir(workdir);

        let Some(limit) = timeout else {
            return cmd.output();
        };

        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        let mut child = cmd.spawn()?;
        let started = Instant::now();
        loop {
            if child.try_wait()?.is_some() {
                return child.wait_with_output();
            }
            if started.elapsed() >= limit {
                child.kill()?;
                // Do not drain the pipes here: a grandchild may still hold
                // them open and reading to EOF would block past the kill.
                let _ = child.wait();
                return Err(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("killed after {}s", limit.as_secs()),
                ));
            }
            std::thread::sleep(Duration::from_millis(25));
        }
    }
}

fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stderr.trim().is_empty() {
        stderr.trim().to_string()
    } else if !stdout.trim().is_empty() {
        stdout.trim().to_string()
    } else {
        format!("initializer exited with {}", output.status)
    }
}

fn entrypoint(record: &ModuleRecord) -> PathBuf {
    record.path.join(INIT_ENTRYPOINT)
}

/// Run one module's initializer. Returns `Ok(false)` without touching the
/// launcher when the module has no entrypoint.
pub fn run_one(
    launcher: &dyn Launcher,
    record: &ModuleRecord,
    workdir: &Path,
    timeout: Option<Duration>,
) -> Result<bool, InitError> {
    let entry = entrypoint(record);
    if !entry.is_file() {
        return Ok(false);
    }

    let output = match launcher.execute(&entry, workdir, timeout) {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
            return Err(InitError::TimedOut {
                module: record.name.clone(),
                seconds: timeout.map(|t| t.as_secs()).unwrap_or_default(),
            })
        }
        Err(e) => {
            return Err(InitError::Spawn {
                module: record.name.clone(),
                source: e,
            })
        }
    };

    if !output.status.success() {
        return Err(InitError::Failed {
            module: record.name.clone(),
            detail: failure_detail(&output),
        });
    }
    Ok(true)
}

/// Run initializers strictly in record order, stopping at and propagating
/// the first failure. Already-finished initializers are not rolled back.
pub fn run_all(
    launcher: &dyn Launcher,
    records: &[ModuleRecord],
    workdir: &Path,
    timeout: Option<Duration>,
) -> Result<RunOutcome, InitError> {
    let mut ran = 0usize;
    let mut skipped = 0usize;
    for record in records {
        if run_one(launcher, record, workdir, timeout)? {
            ran += 1;
        } else {
            skipped += 1;
        }
    }
    Ok(RunOutcome {
        attempted: records.len(),
        ran,
        skipped,
    })
}
