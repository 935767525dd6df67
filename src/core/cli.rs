use crate::session::DEFAULT_SESSION_FILE;
use std::path::PathBuf;

/// Global path flags plus the command line that follows them.
///
/// Path flags are only recognised before the command name; everything after
/// it belongs to the command.
#[derive(Debug, Clone, PartialEq)]
pub struct CliPaths {
    pub config_path: PathBuf,
    pub session_path: PathBuf,
    pub logs_dir: PathBuf,
    pub command: Option<String>,
    pub args: Vec<String>,
}

impl CliPaths {
    pub fn from_env() -> Result<Self, String> {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = String>,
    {
        let mut paths = Self::defaults();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    paths.config_path = Self::next_path(&mut args, "--config")?;
                }
                "--session" => {
                    paths.session_path = Self::next_path(&mut args, "--session")?;
                }
                "--logs" => {
                    paths.logs_dir = Self::next_path(&mut args, "--logs")?;
                }
                flag if flag.starts_with("--") => {
                    return Err(format!("Unknown argument: {arg}"));
                }
                _ => {
                    paths.command = Some(arg);
                    paths.args = args.collect();
                    break;
                }
            }
        }
        Ok(paths)
    }

    fn next_path<I>(args: &mut I, flag: &str) -> Result<PathBuf, String>
    where
        I: Iterator<Item = String>,
    {
        args.next()
            .map(PathBuf::from)
            .ok_or_else(|| format!("Missing value for {flag}"))
    }

    fn defaults() -> Self {
        Self {
            config_path: PathBuf::from("config.json"),
            session_path: PathBuf::from(DEFAULT_SESSION_FILE),
            logs_dir: PathBuf::from("logs"),
            command: None,
            args: Vec::new(),
        }
    }
}
