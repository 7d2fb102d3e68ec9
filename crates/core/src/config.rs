use crate::error::CoreError;
use crate::export::ExportFormat;

/// Average equine gestation length in days.
pub const DEFAULT_GESTATION_DAYS: u32 = 340;

/// Average equine estrous cycle length in days.
pub const DEFAULT_HEAT_CYCLE_DAYS: u32 = 21;

/// Inventory expiring within this many days is flagged on the summary cards.
pub const DEFAULT_EXPIRY_WARNING_DAYS: u32 = 30;

/// Ranch-wide settings that feed derived metrics and statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RanchConfig {
    /// Gestation length used for progress and due-date estimates (default: `340`).
    pub gestation_days: u32,
    /// Estrous cycle length used to predict the next heat (default: `21`).
    pub heat_cycle_days: u32,
    /// Look-ahead window for expiring inventory (default: `30`).
    pub expiry_warning_days: u32,
    /// Format used when an export is requested without one (default: `json`).
    pub export_format: ExportFormat,
}

impl Default for RanchConfig {
    fn default() -> Self {
        Self {
            gestation_days: DEFAULT_GESTATION_DAYS,
            heat_cycle_days: DEFAULT_HEAT_CYCLE_DAYS,
            expiry_warning_days: DEFAULT_EXPIRY_WARNING_DAYS,
            export_format: ExportFormat::Json,
        }
    }
}

impl RanchConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default |
    /// |------------------------------|---------|
    /// | `RANCH_GESTATION_DAYS`       | `340`   |
    /// | `RANCH_HEAT_CYCLE_DAYS`      | `21`    |
    /// | `RANCH_EXPIRY_WARNING_DAYS`  | `30`    |
    /// | `RANCH_EXPORT_FORMAT`        | `json`  |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let defaults = Self::default();

        let gestation_days =
            parse_days(&lookup, "RANCH_GESTATION_DAYS", defaults.gestation_days)?;
        let heat_cycle_days =
            parse_days(&lookup, "RANCH_HEAT_CYCLE_DAYS", defaults.heat_cycle_days)?;
        let expiry_warning_days = match lookup("RANCH_EXPIRY_WARNING_DAYS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                CoreError::Config(format!(
                    "RANCH_EXPIRY_WARNING_DAYS must be a non-negative integer, got '{raw}'"
                ))
            })?,
            None => defaults.expiry_warning_days,
        };
        let export_format = match lookup("RANCH_EXPORT_FORMAT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| CoreError::Config(format!("RANCH_EXPORT_FORMAT '{raw}' is not supported")))?,
            None => defaults.export_format,
        };

        Ok(Self {
            gestation_days,
            heat_cycle_days,
            expiry_warning_days,
            export_format,
        })
    }
}

/// Parse a positive day count, falling back to `default` when unset.
fn parse_days(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u32,
) -> Result<u32, CoreError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<u32>() {
        Ok(days) if days > 0 => Ok(days),
        _ => Err(CoreError::Config(format!(
            "{key} must be a positive integer, got '{raw}'"
        ))),
    }
}
