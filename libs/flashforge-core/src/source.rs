//! Byte sources for uploaded files.

use async_trait::async_trait;

use crate::types::FileMeta;

/// Supplies the raw bytes of an uploaded file.
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Read the whole file into memory.
    async fn read_all(&self) -> std::io::Result<Vec<u8>>;
}

/// Source backed by an owned buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[async_trait]
impl ByteSource for MemorySource {
    async fn read_all(&self) -> std::io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// An upload: reported metadata plus where to read its bytes from.
pub struct UploadedFile {
    pub meta: FileMeta,
    pub source: Box<dyn ByteSource>,
}

impl UploadedFile {
    pub fn new(meta: FileMeta, source: impl ByteSource + 'static) -> Self {
        Self {
            meta,
            source: Box::new(source),
        }
    }

    /// In-memory upload whose declared size is the buffer length.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let source = MemorySource::new(bytes);
        let meta = FileMeta::new(mime_type, source.len() as u64);
        Self::new(meta, source)
    }
}

impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile").field("meta", &self.meta).finish_non_exhaustive()
    }
}
