use scrollpager::{LoadDirection, SettingFlag};

/// Manual controls exposed when `debug` is enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugAction {
    LoadBefore,
    LoadAfter,
    Toggle(SettingFlag),
}

impl DebugAction {
    pub fn load(direction: LoadDirection) -> Self {
        match direction {
            LoadDirection::Before => Self::LoadBefore,
            LoadDirection::After => Self::LoadAfter,
        }
    }
}

/// What a dispatched [`DebugAction`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebugOutcome {
    /// `true` when a fetch was issued (`false`: one is already in flight).
    Load(bool),
    /// The new value of the toggled setting.
    Toggled(bool),
}
