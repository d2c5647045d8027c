use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| Error::Config {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Outer { inner: Inner }

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Inner { count: u32 }

    #[test]
    fn error_names_the_failing_path() {
        let err = from_str_with_path::<Outer>(r#"{"inner": {"count": "three"}}"#).unwrap_err();
        match err {
            Error::Config { path, .. } => assert_eq!(path, "inner.count"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
