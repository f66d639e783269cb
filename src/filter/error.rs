// Path filter errors
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum FilterError {
    #[error("Path regex compilation failed for pattern '{pattern}' (index: {index}): {source}")]
    CompilationFailed {
        pattern: String,
        index: usize,
        #[source]
        source: regex::Error,
    },

    #[error(
        "Include and exclude paths are mutually exclusive ({include} include, {exclude} exclude patterns configured)"
    )]
    MutuallyExclusive { include: usize, exclude: usize },
}
