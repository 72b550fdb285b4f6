use thiserror::Error;

use crate::SourcePlatform;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{platform} export has no {field} column (expected one of: {expected})")]
    MissingColumn {
        platform: SourcePlatform,
        field: &'static str,
        expected: String,
    },
}
