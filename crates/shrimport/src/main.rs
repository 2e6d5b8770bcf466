use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;
use shrimport::env::Env;
use shrimport::InstallError;
use shrimport::Installer;

#[derive(Parser, Debug)]
#[command(
  name = "shrimport",
  override_usage = "shrimport ../local/package/path [/dest/path]",
  disable_version_flag = true,
  after_help = "Environment:\n  SHRIMPORT_NPM      Package manager executable [default: npm]\n  SHRIMPORT_TIMEOUT  Seconds to wait for each package manager command\n  RUST_LOG           Log level (error, warn, info, debug, trace)"
)]
pub struct ShrimportCommand {
  /// Path to the local package to install
  pub local_package: Option<OsString>,
  /// Package to install into [default: current directory]
  pub destination: Option<OsString>,
  /// Anything after the destination is ignored
  #[arg(hide = true, num_args = 0..)]
  pub _ignored: Vec<OsString>,
  /// Show version
  #[arg(short = 'v', long = "version")]
  pub version: bool,
}

fn main() -> ExitCode {
  env_logger::init();

  let args = match ShrimportCommand::try_parse() {
    Ok(args) => args,
    Err(err) => {
      // Help goes to stdout and succeeds, anything else is a usage error
      let code = if err.use_stderr() { 1 } else { 0 };
      err.print().ok();
      return ExitCode::from(code);
    }
  };

  if args.version {
    println!("{}", env!("CARGO_PKG_VERSION"));
    return ExitCode::SUCCESS;
  }

  match run(&args) {
    Ok(destination) => {
      println!(
        "🦐📦 shrimport success! 🎩🍾 {} is now installed in {}!",
        args
          .local_package
          .as_deref()
          .map(|v| v.to_string_lossy())
          .unwrap_or_default(),
        destination
      );
      ExitCode::SUCCESS
    }
    Err(InstallError::Operational(err)) => {
      eprintln!("{}", err);
      ExitCode::FAILURE
    }
    Err(InstallError::Unexpected(err)) => {
      // Context chain on one line, no backtrace
      eprintln!("{:#}", err);
      ExitCode::FAILURE
    }
  }
}

/// Returns the destination as the user gave it, or the working directory
fn run(args: &ShrimportCommand) -> Result<String, InstallError> {
  let env = Env::parse()?;
  let installer = Installer::from_env(&env);

  installer.install(
    args.local_package.as_deref(),
    args.destination.as_deref(),
  )?;

  Ok(match args.destination.as_deref().filter(|v| !v.is_empty()) {
    Some(destination) => destination.to_string_lossy().to_string(),
    None => installer.cwd().display().to_string(),
  })
}
