use stackhook_aws::Location;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("AWS region is not set. Pass --region or set AWS_REGION")]
    MissingRegion,

    #[error("AWS account id is not set. Pass --account-id or set AWS_ACCOUNT_ID")]
    MissingAccountId,

    #[error("invalid AWS account id {0:?}: expected 12 digits")]
    InvalidAccountId(String),

    #[error("AWS partition must not be empty")]
    MissingPartition,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Validated process settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub location: Location,
}

impl Settings {
    pub fn new(region: &str, account_id: &str, partition: &str) -> Result<Self> {
        let region = region.trim();
        let account_id = account_id.trim();
        let partition = partition.trim();

        if region.is_empty() {
            return Err(ConfigError::MissingRegion);
        }
        if account_id.is_empty() {
            return Err(ConfigError::MissingAccountId);
        }
        if account_id.len() != 12 || !account_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidAccountId(account_id.to_string()));
        }
        if partition.is_empty() {
            return Err(ConfigError::MissingPartition);
        }

        Ok(Self {
            location: Location::new(region, account_id).with_partition(partition),
        })
    }
}
