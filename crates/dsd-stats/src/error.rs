#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Invalid value for {field}: {value}")]
    Parse { field: String, value: String },
    #[error("Missing data: {0}")]
    MissingData(String),
}

impl StatsError {
    pub fn parse(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Parse {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingData(field.into())
    }
}
