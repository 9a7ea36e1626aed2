use crate::error::{Result, TagBumpError};
use crate::git::{CommitSummary, TagRepository};
use regex::Regex;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::OnceLock;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default limit for a single `git` invocation
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// stderr of `git describe` when no tag can describe HEAD
const NO_TAGS_PATTERN: &str = r"(?i)no names found|no tags can describe|no annotated tags can describe";

/// stderr of `git tag` when the name is taken
const TAG_EXISTS_PATTERN: &str = r"(?i)tag '[^']*' already exists";

/// Captured result of a finished `git` process
#[derive(Debug)]
pub struct GitOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// stdout and stderr joined, trimmed, for error reports
    pub fn combined(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (true, true) => self.status.to_string(),
            (false, true) => stdout.to_string(),
            (true, false) => stderr.to_string(),
            (false, false) => format!("{}\n{}", stdout, stderr),
        }
    }
}

/// Tag operations implemented by spawning the `git` binary
pub struct GitCommand {
    program: String,
    workdir: PathBuf,
    timeout: Duration,
}

impl GitCommand {
    /// Operate on the repository containing `workdir`
    pub fn new<P: AsRef<Path>>(workdir: P) -> Self {
        GitCommand {
            program: "git".to_string(),
            workdir: workdir.as_ref().to_path_buf(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-invocation timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the binary that is spawned (defaults to `git` on PATH)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Run `git` with the given arguments, killing it once the timeout expires.
    ///
    /// A non-zero exit is not an error here; callers classify the output.
    pub fn run(&self, args: &[&str]) -> Result<GitOutput> {
        let command_line = format!("{} {}", self.program, args.join(" "));
        debug!(command = %command_line, workdir = %self.workdir.display(), "running git");

        let mut child = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .env("GIT_TERMINAL_PROMPT", "0")
            // stderr is classified by its English text
            .env("LC_ALL", "C")
            .env("LANGUAGE", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                TagBumpError::unavailable(format!("failed to run `{}`: {}", command_line, e))
            })?;

        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                warn!(command = %command_line, "git timed out, killing process");
                let _ = child.kill();
                let _ = child.wait();
                return Err(TagBumpError::Timeout {
                    command: command_line,
                    secs: self.timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        let output = GitOutput {
            status,
            stdout: collect(stdout),
            stderr: collect(stderr),
        };
        debug!(command = %command_line, status = %output.status, "git finished");
        Ok(output)
    }
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("git stderr pattern must be a valid regex"))
}

/// Whether `git describe` failed only because there are no tags yet
pub fn is_no_tags_error(stderr: &str) -> bool {
    static NO_TAGS: OnceLock<Regex> = OnceLock::new();
    compiled(&NO_TAGS, NO_TAGS_PATTERN).is_match(stderr)
}

/// Whether `git tag` failed because the name is already taken
pub fn is_tag_exists_error(stderr: &str) -> bool {
    static TAG_EXISTS: OnceLock<Regex> = OnceLock::new();
    compiled(&TAG_EXISTS, TAG_EXISTS_PATTERN).is_match(stderr)
}

impl TagRepository for GitCommand {
    fn latest_tag(&self) -> Result<Option<String>> {
        let output = self.run(&["describe", "--tags", "--abbrev=0"])?;
        if output.success() {
            let tag = output.stdout.trim().to_string();
            return Ok(Some(tag));
        }

        if is_no_tags_error(&output.stderr) {
            debug!("repository has no tags yet");
            return Ok(None);
        }

        Err(TagBumpError::unavailable(output.combined()))
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitSummary>> {
        let range = match tag {
            Some(tag) => format!("{}..HEAD", tag),
            None => "HEAD".to_string(),
        };
        let output = self.run(&["log", "--oneline", &range, "--"])?;
        if !output.success() {
            return Err(TagBumpError::DiffFailed {
                tag: tag.unwrap_or("HEAD").to_string(),
                output: output.combined(),
            });
        }

        Ok(output
            .stdout
            .lines()
            .filter_map(CommitSummary::from_oneline)
            .collect())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let output = self.run(&["tag", name])?;
        if output.success() {
            return Ok(());
        }

        if is_tag_exists_error(&output.stderr) {
            return Err(TagBumpError::TagAlreadyExists {
                tag: name.to_string(),
                output: output.combined(),
            });
        }

        Err(TagBumpError::TagCreationFailed {
            tag: name.to_string(),
            output: output.combined(),
        })
    }

    fn push_tag(&self, name: &str, remote: &str) -> Result<()> {
        let refspec = format!("refs/tags/{}:refs/tags/{}", name, name);
        let output = self.run(&["push", remote, &refspec])?;
        if output.success() {
            return Ok(());
        }

        Err(TagBumpError::PushRejected {
            tag: name.to_string(),
            remote: remote.to_string(),
            output: output.combined(),
        })
    }
}
