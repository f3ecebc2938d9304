//! Window configuration.
//!
//! [`WindowConfig`] carries everything the runner needs to open the input
//! window. Values come from [`Default`], from `PY_INPUT_WINDOW_*`
//! environment variables via [`WindowConfig::from_env`], and finally from
//! explicit overrides, in that order of precedence (later wins).

use std::ffi::OsString;
use std::time::Duration;

use config::{Config, Environment, Map};

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "PY_INPUT_WINDOW";
/// Environment variable overriding the window title.
pub const ENV_TITLE: &str = "PY_INPUT_WINDOW_TITLE";
/// Environment variable overriding the window width in physical pixels.
pub const ENV_WIDTH: &str = "PY_INPUT_WINDOW_WIDTH";
/// Environment variable overriding the window height in physical pixels.
pub const ENV_HEIGHT: &str = "PY_INPUT_WINDOW_HEIGHT";
/// Environment variable overriding the interrupt poll interval (milliseconds).
pub const ENV_POLL_MS: &str = "PY_INPUT_WINDOW_POLL_MS";

const DEFAULT_TITLE: &str = "py_input_window";
const DEFAULT_INTERRUPT_POLL: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors produced while building or validating a [`WindowConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A window dimension of zero was requested.
    #[error("window {dimension} must be positive, got 0")]
    ZeroDimension { dimension: &'static str },

    /// A window dimension does not fit in a `u32`.
    #[error("window {dimension} must be between 1 and {max}, got {value}", max = u32::MAX)]
    DimensionOutOfRange { dimension: &'static str, value: i64 },

    /// Only one of width/height was set.
    #[error("window width and height must be set together (width: {width:?}, height: {height:?})")]
    PartialSize {
        width: Option<u32>,
        height: Option<u32>,
    },

    /// The interrupt poll interval is zero, which would spin the event loop.
    #[error("interrupt poll interval must be positive")]
    ZeroInterruptPoll,

    /// An environment override is not valid UTF-8 or has the wrong type.
    #[error("invalid environment override {var}: {details}")]
    InvalidEnv { var: String, details: String },
}

impl ConfigError {
    fn from_env_source(err: config::ConfigError) -> Self {
        let var = match &err {
            config::ConfigError::Type { key: Some(key), .. } => {
                format!("{ENV_PREFIX}_{}", key.to_uppercase())
            }
            _ => format!("{ENV_PREFIX}_*"),
        };
        ConfigError::InvalidEnv {
            var,
            details: err.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// EnvOverlay
// ---------------------------------------------------------------------------

/// Fields settable from the environment, keyed by the lowercased variable
/// name without the prefix (`PY_INPUT_WINDOW_POLL_MS` -> `poll_ms`).
#[derive(Debug, Default, serde::Deserialize)]
struct EnvOverlay {
    title: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    poll_ms: Option<u64>,
}

// ---------------------------------------------------------------------------
// WindowConfig
// ---------------------------------------------------------------------------

/// Configuration for the input window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Title of the OS window.
    pub title: String,
    /// Initial inner width in physical pixels. `None` lets the platform pick.
    pub width: Option<u32>,
    /// Initial inner height in physical pixels. `None` lets the platform pick.
    pub height: Option<u32>,
    /// Upper bound on how long the loop waits before giving the handler an
    /// idle callback (used to notice interrupts while no input arrives).
    pub interrupt_poll: Duration,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            width: None,
            height: None,
            interrupt_poll: DEFAULT_INTERRUPT_POLL,
        }
    }
}

impl WindowConfig {
    /// Default configuration with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_interrupt_poll(mut self, interval: Duration) -> Self {
        self.interrupt_poll = interval;
        self
    }

    /// Defaults overlaid with any `PY_INPUT_WINDOW_*` environment variables.
    ///
    /// A prefixed variable whose value is not valid UTF-8 is an error rather
    /// than being skipped.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars_os())
    }

    /// Like [`from_env`](Self::from_env) but reads the given variables
    /// instead of the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let prefix = format!("{ENV_PREFIX}_");
        let mut source = Map::new();
        for (name, value) in vars {
            // Names that are not UTF-8 cannot carry our prefix.
            let Some(name) = name.to_str().map(str::to_owned) else {
                continue;
            };
            if !name.starts_with(&prefix) {
                continue;
            }
            let value = value.into_string().map_err(|raw| ConfigError::InvalidEnv {
                var: name.clone(),
                details: format!("value {raw:?} is not valid UTF-8"),
            })?;
            source.insert(name, value);
        }

        let overlay: EnvOverlay = Config::builder()
            .add_source(Environment::with_prefix(ENV_PREFIX).source(Some(source)))
            .build()
            .and_then(|settings| settings.try_deserialize::<EnvOverlay>())
            .map_err(ConfigError::from_env_source)?;
        tracing::debug!(?overlay, "environment overrides loaded");

        let mut config = Self::default();
        if let Some(title) = overlay.title {
            config.title = title;
        }
        config.width = overlay.width.or(config.width);
        config.height = overlay.height.or(config.height);
        if let Some(millis) = overlay.poll_ms {
            config.interrupt_poll = Duration::from_millis(millis);
        }
        Ok(config)
    }

    /// Apply caller overrides field by field; `None` keeps the current value.
    ///
    /// Dimensions are taken as signed integers so that negative or oversized
    /// values surface as [`ConfigError::DimensionOutOfRange`]. The result is
    /// not validated; call [`validate`](Self::validate) afterwards.
    pub fn with_overrides(
        mut self,
        title: Option<String>,
        width: Option<i64>,
        height: Option<i64>,
    ) -> Result<Self, ConfigError> {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(width) = width {
            self.width = Some(dimension("width", width)?);
        }
        if let Some(height) = height {
            self.height = Some(dimension("height", height)?);
        }
        Ok(self)
    }

    /// Check the configuration before a window is created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == Some(0) {
            return Err(ConfigError::ZeroDimension { dimension: "width" });
        }
        if self.height == Some(0) {
            return Err(ConfigError::ZeroDimension {
                dimension: "height",
            });
        }
        if self.width.is_some() != self.height.is_some() {
            return Err(ConfigError::PartialSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.interrupt_poll.is_zero() {
            return Err(ConfigError::ZeroInterruptPoll);
        }
        Ok(())
    }

    /// The requested inner size, if both dimensions are set.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }
}

fn dimension(dimension: &'static str, value: i64) -> Result<u32, ConfigError> {
    u32::try_from(value).map_err(|_| ConfigError::DimensionOutOfRange { dimension, value })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(OsString, OsString)> {
        pairs
            .iter()
            .map(|(k, v)| (OsString::from(k), OsString::from(v)))
            .collect()
    }

    #[test]
    fn defaults_are_valid() {
        let config = WindowConfig::default();
        assert_eq!(config.title, "py_input_window");
        assert_eq!(config.size(), None);
        assert_eq!(config.interrupt_poll, Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let config = WindowConfig::new("keys")
            .with_size(640, 480)
            .with_interrupt_poll(Duration::from_millis(20));
        assert_eq!(config.title, "keys");
        assert_eq!(config.size(), Some((640, 480)));
        assert_eq!(config.interrupt_poll, Duration::from_millis(20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let err = WindowConfig::default()
            .with_size(0, 480)
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroDimension { dimension: "width" });

        let err = WindowConfig::default()
            .with_size(640, 0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::ZeroDimension {
                dimension: "height"
            }
        );
    }

    #[test]
    fn partial_size_is_rejected() {
        let config = WindowConfig {
            width: Some(640),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PartialSize {
                width: Some(640),
                height: None
            })
        ));
    }

    #[test]
    fn zero_poll_is_rejected() {
        let config = WindowConfig::default().with_interrupt_poll(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterruptPoll));
    }

    // -- environment --------------------------------------------------------

    #[test]
    fn env_overrides_defaults() {
        let config = WindowConfig::from_vars(vars(&[
            (ENV_TITLE, "from env"),
            (ENV_WIDTH, "800"),
            (ENV_HEIGHT, "600"),
            (ENV_POLL_MS, "250"),
        ]))
        .unwrap();
        assert_eq!(config.title, "from env");
        assert_eq!(config.size(), Some((800, 600)));
        assert_eq!(config.interrupt_poll, Duration::from_millis(250));
    }

    #[test]
    fn empty_env_gives_defaults() {
        let config = WindowConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config, WindowConfig::default());
    }

    #[test]
    fn unrelated_variables_are_ignored() {
        let config = WindowConfig::from_vars(vars(&[
            ("PATH", "/usr/bin"),
            ("PY_INPUT_WINDOW_LOG", "debug"),
            ("WIDTH", "wide"),
        ]))
        .unwrap();
        assert_eq!(config, WindowConfig::default());
    }

    #[test]
    fn unparsable_env_is_an_error() {
        let err = WindowConfig::from_vars(vars(&[(ENV_WIDTH, "wide")])).unwrap_err();
        assert!(
            matches!(&err, ConfigError::InvalidEnv { var, .. } if var.starts_with(ENV_PREFIX)),
            "unexpected error: {err:?}"
        );
        assert!(err.to_string().starts_with("invalid environment override PY_INPUT_WINDOW_"));
    }

    #[test]
    fn negative_env_dimension_is_an_error() {
        let err = WindowConfig::from_vars(vars(&[(ENV_WIDTH, "-5"), (ENV_HEIGHT, "10")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_env_value_is_an_error() {
        use std::os::unix::ffi::OsStringExt;

        let raw = vec![(
            OsString::from(ENV_WIDTH),
            OsString::from_vec(vec![0xff, 0xfe]),
        )];
        let err = WindowConfig::from_vars(raw).unwrap_err();
        match err {
            ConfigError::InvalidEnv { var, details } => {
                assert_eq!(var, ENV_WIDTH);
                assert!(details.contains("not valid UTF-8"), "{details}");
            }
            other => panic!("expected InvalidEnv, got {other:?}"),
        }
    }

    // -- caller overrides ---------------------------------------------------

    #[test]
    fn overrides_apply_per_field() {
        let env = WindowConfig::from_vars(vars(&[(ENV_WIDTH, "800"), (ENV_HEIGHT, "600")]))
            .unwrap();

        let config = env.with_overrides(None, None, Some(400)).unwrap();
        assert_eq!(config.size(), Some((800, 400)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overrides_keep_unset_fields() {
        let base = WindowConfig::new("base").with_size(320, 240);
        let config = base.clone().with_overrides(None, None, None).unwrap();
        assert_eq!(config, base);

        let config = base.with_overrides(Some("new".to_owned()), Some(640), None).unwrap();
        assert_eq!(config.title, "new");
        assert_eq!(config.size(), Some((640, 240)));
    }

    #[test]
    fn out_of_range_override_is_rejected() {
        let err = WindowConfig::default()
            .with_overrides(None, Some(-1), Some(10))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DimensionOutOfRange {
                dimension: "width",
                value: -1
            }
        );

        let err = WindowConfig::default()
            .with_overrides(None, Some(10), Some(i64::from(u32::MAX) + 1))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DimensionOutOfRange {
                dimension: "height",
                ..
            }
        ));
    }

    #[test]
    fn zero_override_fails_validation() {
        let config = WindowConfig::default()
            .with_overrides(None, Some(0), Some(10))
            .unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroDimension { dimension: "width" })
        );
    }
}
