#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("io error writing a result record: {0}")]
    Io(#[from] std::io::Error),
}
