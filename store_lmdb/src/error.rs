use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(String),

    #[error("key not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("database is corrupted: {0}")]
    Corruption(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<heed::Error> for LmdbError {
    fn from(e: heed::Error) -> Self {
        match e {
            heed::Error::Encoding(err) | heed::Error::Decoding(err) => {
                LmdbError::Serialization(err.to_string())
            }
            heed::Error::Mdb(err @ heed::MdbError::Corrupted) => {
                LmdbError::Corruption(err.to_string())
            }
            other => LmdbError::Heed(other.to_string()),
        }
    }
}

impl From<std::io::Error> for LmdbError {
    fn from(e: std::io::Error) -> Self {
        LmdbError::Io(e.to_string())
    }
}

impl From<LmdbError> for signet_store::StoreError {
    fn from(e: LmdbError) -> Self {
        match e {
            LmdbError::NotFound(key) => signet_store::StoreError::NotFound(key),
            LmdbError::Serialization(msg) => signet_store::StoreError::Serialization(msg),
            LmdbError::Corruption(msg) => signet_store::StoreError::Corruption(msg),
            other => signet_store::StoreError::Backend(other.to_string()),
        }
    }
}
