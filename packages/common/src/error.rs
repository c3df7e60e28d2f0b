use entitygen_parser::ParseError;
use entitygen_store::StoreError;
use thiserror::Error;

/// Common error type that can hold any entitygen error
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

impl From<String> for CommonError {
    fn from(s: String) -> Self {
        CommonError::Generic(s)
    }
}

impl From<&str> for CommonError {
    fn from(s: &str) -> Self {
        CommonError::Generic(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::CommonResult;

    fn parse_empty() -> CommonResult<()> {
        entitygen_parser::parse_interface("", "MissingInterface")?;
        Ok(())
    }

    fn get_missing() -> CommonResult<()> {
        let store = entitygen_store::EntityStore::new();
        store.get("banana")?;
        Ok(())
    }

    #[test]
    fn test_parse_error_converts() {
        let err = parse_empty().unwrap_err();
        assert!(matches!(err, CommonError::Parse(_)));
        assert!(err.to_string().contains("MissingInterface"));
    }

    #[test]
    fn test_store_error_converts() {
        let err = get_missing().unwrap_err();
        assert!(matches!(err, CommonError::Store(_)));
        assert!(err.to_string().contains("banana"));
    }

    #[test]
    fn test_generic_from_str() {
        let err: CommonError = "something odd".into();
        assert_eq!(err.to_string(), "Generic error: something odd");
    }
}
