use crate::SettingsError;

/// How a leading-edge insertion is compensated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Compensation {
    /// Add the inserted page height to the scroll offset.
    #[default]
    ScrollOffset,
    /// Add the inserted page height minus the height of the page evicted by the same merge.
    ScrollOffsetNetOfEviction,
    /// Leave the scroll offset alone and accumulate a container translation instead.
    ///
    /// Meant for hosts without native scrolling, together with [`crate::ScrollGate`].
    Translate,
}

/// A boolean setting that can be flipped at runtime (debug surface).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SettingFlag {
    StartBottomUp,
    PagingEnabled,
    Debug,
}

/// Per-session configuration for [`crate::PaginationController`].
///
/// With `feature = "serde"`, every field is optional when deserializing: missing fields take the
/// values from [`Settings::default`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Anchor the initial scroll position at the end and display the window reversed, which swaps
    /// the sentinel edges (`Leading` loads `After`, `Trailing` loads `Before`).
    pub start_bottom_up: bool,
    /// Window capacity, in pages.
    pub max_page_buffer: usize,
    /// Global switch for sentinel-driven loading.
    pub is_paging_enabled: bool,
    /// Disables sentinel-driven loading; loads only happen through manual requests.
    pub debug: bool,
    /// A sentinel triggers a load when its intersection ratio is strictly above this value.
    pub load_threshold: f32,
    /// [`crate::ScrollGate`] blocks movement toward a sentinel whose ratio is strictly above this.
    pub pause_threshold: f32,
    pub compensation: Compensation,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_bottom_up: false,
            max_page_buffer: 15,
            is_paging_enabled: true,
            debug: false,
            load_threshold: 0.0,
            pause_threshold: 0.5,
            compensation: Compensation::ScrollOffset,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_page_buffer == 0 {
            return Err(SettingsError::ZeroPageBuffer);
        }
        check_ratio("load_threshold", self.load_threshold)?;
        check_ratio("pause_threshold", self.pause_threshold)?;
        Ok(())
    }

    pub fn flag(&self, flag: SettingFlag) -> bool {
        match flag {
            SettingFlag::StartBottomUp => self.start_bottom_up,
            SettingFlag::PagingEnabled => self.is_paging_enabled,
            SettingFlag::Debug => self.debug,
        }
    }

    pub fn set_flag(&mut self, flag: SettingFlag, value: bool) {
        match flag {
            SettingFlag::StartBottomUp => self.start_bottom_up = value,
            SettingFlag::PagingEnabled => self.is_paging_enabled = value,
            SettingFlag::Debug => self.debug = value,
        }
    }

    pub fn with_start_bottom_up(mut self, start_bottom_up: bool) -> Self {
        self.start_bottom_up = start_bottom_up;
        self
    }

    pub fn with_max_page_buffer(mut self, max_page_buffer: usize) -> Self {
        self.max_page_buffer = max_page_buffer;
        self
    }

    pub fn with_paging_enabled(mut self, is_paging_enabled: bool) -> Self {
        self.is_paging_enabled = is_paging_enabled;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_load_threshold(mut self, load_threshold: f32) -> Self {
        self.load_threshold = load_threshold;
        self
    }

    pub fn with_pause_threshold(mut self, pause_threshold: f32) -> Self {
        self.pause_threshold = pause_threshold;
        self
    }

    pub fn with_compensation(mut self, compensation: Compensation) -> Self {
        self.compensation = compensation;
        self
    }

    pub(crate) fn flags_differ(&self, other: &Self) -> bool {
        self.start_bottom_up != other.start_bottom_up
            || self.is_paging_enabled != other.is_paging_enabled
            || self.debug != other.debug
    }
}

fn check_ratio(name: &'static str, value: f32) -> Result<(), SettingsError> {
    // NaN fails the range check too.
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::ThresholdOutOfRange { name, value })
    }
}
