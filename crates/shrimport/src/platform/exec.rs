use std::collections::HashMap;
use std::ffi::OsStr;
use std::ffi::OsString;
use std::io::Read;
use std::path::PathBuf;
use std::process::Child;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;

#[derive(Debug, Default, Clone)]
pub struct ExecOptions {
  pub cwd: Option<PathBuf>,
  /// Discard stdout and capture stderr for the error message
  pub silent: bool,
  pub env: Option<HashMap<String, String>>,
  /// Kill the process if it has not exited after this long
  pub timeout: Option<Duration>,
}

pub fn exec_blocking<I, S>(args: I, options: &ExecOptions) -> anyhow::Result<()>
where
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  let mut args = args
    .into_iter()
    .map(|v| v.as_ref().to_os_string())
    .collect::<Vec<OsString>>();
  if args.is_empty() {
    return Err(anyhow::anyhow!("No command provided"));
  }
  let arg0 = args.remove(0);
  let command_line = display_command(&arg0, &args);

  let mut command = Command::new(&arg0);

  command.args(&args);

  if let Some(cwd) = &options.cwd {
    command.current_dir(cwd);
  }

  if let Some(extra_env) = &options.env {
    for (key, val) in extra_env {
      command.env(key, val);
    }
  }

  if options.silent {
    command.stdin(Stdio::null());
    command.stdout(Stdio::null());
    command.stderr(Stdio::piped());
  }

  log::debug!("exec: {} (cwd: {:?})", command_line, options.cwd);

  let mut child = command
    .spawn()
    .with_context(|| format!("Unable to spawn `{}`", command_line))?;

  // Drain stderr on its own thread so a chatty process can't fill the pipe
  // while we wait on it
  let stderr_reader = child.stderr.take().map(|mut stderr| {
    std::thread::spawn(move || {
      let mut buf = String::new();
      stderr.read_to_string(&mut buf).ok();
      buf
    })
  });

  let status = match options.timeout {
    Some(timeout) => match child.wait_timeout(timeout)? {
      Some(status) => status,
      None => {
        child.kill().ok();
        child.wait().ok();
        log::error!("exec:timeout: {}", command_line);
        return Err(anyhow::anyhow!(
          "`{}` timed out after {:.2?}",
          command_line,
          timeout
        ));
      }
    },
    None => child.wait()?,
  };

  let stderr = stderr_reader
    .and_then(|handle| handle.join().ok())
    .unwrap_or_default();

  if !status.success() {
    log::error!("exec:failed: {} ({})", command_line, status);
    let stderr = stderr.trim();
    if stderr.is_empty() {
      return Err(anyhow::anyhow!("`{}` exited with {}", command_line, status));
    }
    return Err(anyhow::anyhow!(
      "`{}` exited with {}\n{}",
      command_line,
      status,
      stderr
    ));
  }

  Ok(())
}

fn display_command(arg0: &OsStr, args: &[OsString]) -> String {
  let mut line = arg0.to_string_lossy().to_string();
  for arg in args {
    line.push(' ');
    line.push_str(&arg.to_string_lossy());
  }
  line
}

trait ChildExt {
  fn wait_timeout(&mut self, timeout: Duration) -> std::io::Result<Option<ExitStatus>>;
}

impl ChildExt for Child {
  fn wait_timeout(&mut self, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(50);

    loop {
      if let Some(status) = self.try_wait()? {
        return Ok(Some(status));
      }
      if start.elapsed() >= timeout {
        return Ok(None);
      }
      std::thread::sleep(poll_interval);
    }
  }
}
