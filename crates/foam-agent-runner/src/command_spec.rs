use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

// ============================================================================
// CommandSpec - argv-style process description
// ============================================================================

/// Description of a process to launch.
///
/// Arguments are kept as discrete `OsString` elements and handed to
/// `Command::args`, never re-joined into a shell string.
///
/// The environment has two modes. By default the child inherits the parent
/// environment with [`CommandSpec::env`] entries layered on top. After
/// [`CommandSpec::env_clear`] the child sees exactly the entries set on the
/// spec and nothing else, which is how Foam-Agent jobs are launched.
///
/// # Example
///
/// ```rust
/// use foam_agent_runner::CommandSpec;
/// use std::ffi::OsString;
///
/// let cmd = CommandSpec::new("bash")
///     .args(["-lc", "python foambench_main.py --output out"])
///     .cwd("/opt/foam-agent")
///     .env_clear()
///     .env("PATH", "/usr/bin:/bin");
///
/// assert_eq!(cmd.program, OsString::from("bash"));
/// assert_eq!(cmd.args.len(), 2);
/// assert!(cmd.clear_env);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    /// The program to execute
    pub program: OsString,
    /// Arguments as discrete elements
    pub args: Vec<OsString>,
    /// Optional working directory
    pub cwd: Option<PathBuf>,
    /// Environment entries applied to the child
    pub env: BTreeMap<OsString, OsString>,
    /// Start the child from an empty environment instead of inheriting
    pub clear_env: bool,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Build a spec from a full argv vector (`argv[0]` is the program).
    ///
    /// Returns `None` for an empty vector.
    #[must_use]
    pub fn from_argv<I, S>(argv: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut iter = argv.into_iter();
        let program = iter.next()?;
        Some(Self::new(program).args(iter))
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set one environment variable for the child.
    #[must_use]
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set several environment variables for the child.
    #[must_use]
    pub fn envs<I, K, V>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        for (key, value) in envs {
            self.env.insert(key.into(), value.into());
        }
        self
    }

    /// Do not inherit the parent environment.
    ///
    /// The caller becomes responsible for every variable the child needs,
    /// `PATH` included.
    #[must_use]
    pub fn env_clear(mut self) -> Self {
        self.clear_env = true;
        self
    }

    /// Program name for diagnostics.
    #[must_use]
    pub fn program_display(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Convert into a `std::process::Command`.
    ///
    /// On Unix the child is placed in its own process group so a timeout can
    /// signal the whole tree (`bash`, the interpreter and anything they fork).
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        if self.clear_env {
            cmd.env_clear();
        }
        cmd.envs(&self.env);

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        cmd
    }
}
