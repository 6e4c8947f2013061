use std::path::{Path, PathBuf};

use tokio::fs;

use super::{Number, Speed};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Clip layout on disk: `{root}/{speed}/{number:03}.mp3`.
#[derive(Debug, Clone)]
pub struct AudioFileStore {
    root: PathBuf,
}

impl AudioFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn speed_dir(&self, speed: Speed) -> PathBuf {
        self.root.join(speed.as_str())
    }

    pub fn path_for(&self, speed: Speed, number: Number) -> PathBuf {
        self.speed_dir(speed).join(number.file_name())
    }

    pub async fn exists(&self, speed: Speed, number: Number) -> bool {
        fs::try_exists(self.path_for(speed, number))
            .await
            .unwrap_or(false)
    }

    pub async fn write(
        &self,
        speed: Speed,
        number: Number,
        data: &[u8],
    ) -> Result<PathBuf, StoreError> {
        let dir = self.speed_dir(speed);
        fs::create_dir_all(&dir).await.map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        let path = self.path_for(speed, number);
        fs::write(&path, data).await.map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(
            speed = %speed,
            number = %number,
            size = data.len(),
            "Saved audio clip"
        );

        Ok(path)
    }

    /// Number of `.mp3` clips present for a speed. A missing directory counts as empty.
    pub async fn count_clips(&self, speed: Speed) -> usize {
        let mut count = 0;
        let Ok(mut entries) = fs::read_dir(self.speed_dir(speed)).await else {
            return 0;
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            if entry.path().extension().map_or(false, |ext| ext == "mp3") {
                count += 1;
            }
        }

        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(n: i64) -> Number {
        Number::new(n).unwrap()
    }

    #[test]
    fn path_layout() {
        let store = AudioFileStore::new("audio_files");
        assert_eq!(
            store.path_for(Speed::Slow, number(1)),
            PathBuf::from("audio_files/slow/001.mp3")
        );
        assert_eq!(
            store.path_for(Speed::Fast, number(100)),
            PathBuf::from("audio_files/fast/100.mp3")
        );
    }

    #[tokio::test]
    async fn write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioFileStore::new(dir.path());

        assert!(!store.exists(Speed::Normal, number(7)).await);
        let path = store.write(Speed::Normal, number(7), b"ID3").await.unwrap();

        assert_eq!(path, dir.path().join("normal").join("007.mp3"));
        assert!(store.exists(Speed::Normal, number(7)).await);
        assert_eq!(std::fs::read(path).unwrap(), b"ID3");
    }

    #[tokio::test]
    async fn counts_only_mp3_clips() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioFileStore::new(dir.path());

        assert_eq!(store.count_clips(Speed::Fast).await, 0);

        store.write(Speed::Fast, number(1), b"a").await.unwrap();
        store.write(Speed::Fast, number(2), b"b").await.unwrap();
        std::fs::write(dir.path().join("fast").join("notes.txt"), b"x").unwrap();

        assert_eq!(store.count_clips(Speed::Fast).await, 2);
        assert_eq!(store.count_clips(Speed::Slow).await, 0);
    }
}
