use crate::settings::SettingsError;
use thiserror::Error;

pub type ViewerResult<T> = std::result::Result<T, ViewerError>;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("viewport controller is not bound to a content element")]
    NotReady,
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
