use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("page is already present in the window")]
    DuplicatePage,
}

#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum SettingsError {
    #[error("max_page_buffer must be greater than zero")]
    ZeroPageBuffer,
    #[error("{name} must be within 0.0..=1.0 (got {value})")]
    ThresholdOutOfRange { name: &'static str, value: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Window(#[from] WindowError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
