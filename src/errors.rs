use crate::external_conditions::MissingTemperatureDataError;
use crate::input::InvalidConfigurationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisaggregationError {
    #[error("Request was considered invalid due to error: {0}")]
    InvalidRequest(#[from] anyhow::Error),
    #[error(transparent)]
    InvalidConfiguration(#[from] InvalidConfigurationError),
    #[error(transparent)]
    MissingTemperatureData(#[from] MissingTemperatureDataError),
    #[error("Error while writing results: {0}")]
    ErrorInOutput(OutputError),
}

#[derive(Debug, Error)]
#[error(transparent)]
pub struct OutputError {
    error: anyhow::Error,
}

impl OutputError {
    pub(crate) fn new(error: anyhow::Error) -> Self {
        Self { error }
    }
}
