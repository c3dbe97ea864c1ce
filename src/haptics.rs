//! Haptic feedback mode.
//!
//! The mode cycles `Off → Light → Medium → Heavy → Off` and is persisted as
//! its ordinal so it survives restarts. Actual vibration is delegated to a
//! [`HapticDriver`].

use std::fmt::Debug;
use std::sync::Arc;

use serde::{
    Deserialize,
    Serialize,
};

use crate::prefs::{
    PreferenceStore,
    PreferenceStoreExt,
    PrefsError,
};

/// Preference key holding the mode ordinal.
pub const HAPTIC_MODE_KEY: &str = "hapticMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HapticMode {
    #[default]
    Off,
    Light,
    Medium,
    Heavy,
}

impl HapticMode {
    /// Next mode in the cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Off => Self::Light,
            Self::Light => Self::Medium,
            Self::Medium => Self::Heavy,
            Self::Heavy => Self::Off,
        }
    }

    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Light => 1,
            Self::Medium => 2,
            Self::Heavy => 3,
        }
    }

    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Off),
            1 => Some(Self::Light),
            2 => Some(Self::Medium),
            3 => Some(Self::Heavy),
            _ => None,
        }
    }
}

/// Platform vibration capability.
pub trait HapticDriver: Send + Sync + Debug {
    /// Play a single impact at the given strength. Never called with `Off`.
    fn impact(&self, mode: HapticMode);
}

/// Driver that only records impacts in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHapticDriver;

impl HapticDriver for TracingHapticDriver {
    fn impact(&self, mode: HapticMode) {
        tracing::debug!(?mode, "Haptic impact");
    }
}

/// Holds the current mode and forwards feedback to the driver.
#[derive(Debug)]
pub struct HapticController<D> {
    /// Current mode
    mode: HapticMode,
    /// Platform driver
    driver: D,
    /// Where the mode ordinal is persisted
    prefs: Arc<dyn PreferenceStore>,
}

impl<D: HapticDriver> HapticController<D> {
    /// Restore the persisted mode; unknown or missing values mean `Off`.
    pub fn load(driver: D, prefs: Arc<dyn PreferenceStore>) -> Self {
        let mode = prefs
            .get::<u8>(HAPTIC_MODE_KEY)
            .and_then(HapticMode::from_ordinal)
            .unwrap_or_default();
        tracing::debug!(?mode, "Loaded haptic mode");
        Self { mode, driver, prefs }
    }

    #[must_use]
    pub const fn mode(&self) -> HapticMode {
        self.mode
    }

    /// Advance to the next mode and persist it.
    ///
    /// The in-memory mode advances even if persisting fails.
    pub fn cycle(&mut self) -> Result<HapticMode, PrefsError> {
        self.mode = self.mode.next();
        self.prefs.save(HAPTIC_MODE_KEY, &self.mode.ordinal())?;
        Ok(self.mode)
    }

    /// Play feedback at the current strength unless haptics are off.
    pub fn feedback(&self) {
        if self.mode != HapticMode::Off {
            self.driver.impact(self.mode);
        }
    }
}
