use scrollpager::{ControllerError, LoadDirection, SettingsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError<E> {
    /// The host failed to produce a page. The direction stays in flight until
    /// [`crate::Driver::reset`].
    #[error("fetching a page ({direction:?}) failed")]
    Fetch {
        direction: LoadDirection,
        #[source]
        source: E,
    },
    #[error(transparent)]
    Controller(#[from] ControllerError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("debug actions require `debug` to be enabled")]
    DebugDisabled,
}

impl<E> DriverError<E> {
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}
