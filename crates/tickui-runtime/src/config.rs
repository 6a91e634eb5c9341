#![forbid(unsafe_code)]

//! Frame-loop configuration.
//!
//! [`ProgramConfig`] is built in code with `with_*` methods, or read from the
//! environment with [`ProgramConfig::from_env`]:
//!
//! | Variable      | Meaning                       | Default |
//! |---------------|-------------------------------|---------|
//! | `TICKUI_FPS`  | Frames (ticks) per second     | `30`    |

use std::ffi::OsString;
use std::fmt;

use web_time::Duration;

/// Default frame rate.
pub const DEFAULT_FPS: u32 = 30;

/// Environment variable overriding the frame rate.
pub const FPS_ENV: &str = "TICKUI_FPS";

/// Invalid frame-loop configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `fps` was zero.
    ZeroFps,
    /// An environment variable held something unparseable.
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// The offending value.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroFps => write!(f, "fps must be at least 1"),
            Self::InvalidEnv { var, value } => write!(f, "invalid value for {var}: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// How the driver paces frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramConfig {
    /// Target frames per second. One tick is dispatched per frame.
    pub fps: u32,
    /// Sleep out the rest of each frame budget. Disable for headless runs.
    pub pace: bool,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            pace: true,
        }
    }
}

impl ProgramConfig {
    /// Default configuration (30 fps, paced).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame rate.
    #[must_use]
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Enable or disable frame pacing.
    #[must_use]
    pub fn with_pacing(mut self, pace: bool) -> Self {
        self.pace = pace;
        self
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_os_lookup(|var| std::env::var_os(var))
    }

    /// Defaults overridden by `lookup`, which maps variable names to values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Self::from_os_lookup(|var| lookup(var).map(OsString::from))
    }

    /// Like [`from_lookup`](Self::from_lookup), for raw environment values.
    /// A value that is not valid Unicode is rejected, not ignored.
    pub fn from_os_lookup(
        lookup: impl Fn(&str) -> Option<OsString>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(FPS_ENV) {
            let raw = raw.into_string().map_err(|raw| ConfigError::InvalidEnv {
                var: FPS_ENV,
                value: raw.to_string_lossy().into_owned(),
            })?;
            config.fps = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: FPS_ENV,
                value: raw.clone(),
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        Ok(())
    }

    /// Wall-clock budget for one frame.
    #[must_use]
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ProgramConfig::default();
        assert_eq!(config.fps, 30);
        assert!(config.pace);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_fps_is_rejected() {
        let config = ProgramConfig::new().with_fps(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroFps));
    }

    #[test]
    fn frame_budget_follows_fps() {
        let config = ProgramConfig::new().with_fps(50);
        assert_eq!(config.frame_budget(), Duration::from_millis(20));
    }

    #[test]
    fn lookup_overrides_fps() {
        let config =
            ProgramConfig::from_lookup(|var| (var == FPS_ENV).then(|| " 60 ".to_string()))
                .unwrap();
        assert_eq!(config.fps, 60);
    }

    #[test]
    fn lookup_without_vars_gives_defaults() {
        let config = ProgramConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ProgramConfig::default());
    }

    #[test]
    fn lookup_rejects_garbage_and_zero() {
        let err = ProgramConfig::from_lookup(|_| Some("fast".to_string())).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv {
                var: FPS_ENV,
                value: "fast".to_string()
            }
        );
        let err = ProgramConfig::from_lookup(|_| Some("0".to_string())).unwrap_err();
        assert_eq!(err, ConfigError::ZeroFps);
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_env_value_is_rejected() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(vec![0x36, 0xff]);
        let err = ProgramConfig::from_os_lookup(|var| (var == FPS_ENV).then(|| raw.clone()))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv {
                var: FPS_ENV,
                value: "6\u{fffd}".to_string()
            }
        );
    }

    #[test]
    fn os_lookup_accepts_unicode_values() {
        let config =
            ProgramConfig::from_os_lookup(|var| (var == FPS_ENV).then(|| OsString::from("45")))
                .unwrap();
        assert_eq!(config.fps, 45);
    }

    #[test]
    fn error_display() {
        assert_eq!(ConfigError::ZeroFps.to_string(), "fps must be at least 1");
        let err = ConfigError::InvalidEnv {
            var: FPS_ENV,
            value: "x".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for TICKUI_FPS: \"x\"");
    }
}
