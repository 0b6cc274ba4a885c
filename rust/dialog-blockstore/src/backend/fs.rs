use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ipld_core::cid::Cid;

use crate::{Block, BlockStore, BlockStoreError};

/// A basic file-system-based [BlockStore] implementation. All blocks are
/// stored inside a root directory as files named after the string form of
/// their [Cid].
#[derive(Clone, Debug)]
pub struct FileSystemBlockStore {
    root_dir: PathBuf,
}

impl FileSystemBlockStore {
    /// Creates a new [`FileSystemBlockStore`] that stores files in
    /// `root_dir`, creating the directory if needed.
    pub async fn new<Pathlike>(root_dir: Pathlike) -> Result<Self, BlockStoreError>
    where
        Pathlike: AsRef<Path>,
    {
        let root_dir = root_dir.as_ref().to_owned();
        tokio::fs::create_dir_all(&root_dir)
            .await
            .map_err(|error| BlockStoreError::Backend(format!("{error}")))?;
        Ok(Self { root_dir })
    }

    fn make_path(&self, cid: &Cid) -> PathBuf {
        self.root_dir.join(cid.to_string())
    }
}

#[async_trait]
impl BlockStore for FileSystemBlockStore {
    async fn get(&self, cid: &Cid) -> Result<Option<Vec<u8>>, BlockStoreError> {
        match tokio::fs::read(self.make_path(cid)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(BlockStoreError::Backend(format!("{error}"))),
        }
    }

    async fn put(&self, block: Block) -> Result<(), BlockStoreError> {
        let path = self.make_path(block.cid());
        tokio::fs::write(path, block.bytes())
            .await
            .map_err(|error| BlockStoreError::Backend(format!("{error}")))
    }

    async fn delete(&self, cid: &Cid) -> Result<(), BlockStoreError> {
        match tokio::fs::remove_file(self.make_path(cid)).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(BlockStoreError::Backend(format!("{error}"))),
        }
    }
}
