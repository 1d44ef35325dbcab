//! Per-member persistence on disk.
use serde::{Serialize, Deserialize};

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{
    BossError,
    IndividualBoss,
    Result,
    constants::{DEFAULT_STORAGE_DIR, MEMBER_FILE_PREFIX},
    logging,
};


/// What happens to the members admitted by the search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerialiseOption {
    /// Members stay in memory only.
    #[default]
    None,
    /// Members are written to disk and stay in memory.
    Store,
    /// Members are written to disk and dropped from memory.
    /// They are reloaded at every prediction.
    StoreLoad,
}


/// A directory holding one JSON file per persisted member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberStore {
    dir: PathBuf,
}


impl Default for MemberStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_DIR)
    }
}


impl MemberStore {
    /// Construct a store writing into `dir`.
    /// The directory is created on the first write.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }


    /// Returns the storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }


    /// Returns the file of member `id`.
    pub fn path_of(&self, id: usize) -> PathBuf {
        self.dir.join(format!("{MEMBER_FILE_PREFIX}{id}.json"))
    }


    /// Write `model` as member `id`.
    /// A failure is reported on stderr and `false` is returned.
    pub fn persist(&self, id: usize, model: &IndividualBoss) -> bool {
        match self.write(id, model) {
            Ok(()) => true,
            Err(e) => {
                logging::warn(format!("Failed to persist member {id}: {e}"));
                false
            },
        }
    }


    /// Read member `id` back.
    pub fn load(&self, id: usize) -> Result<IndividualBoss> {
        let path = self.path_of(id);
        let file = File::open(&path)
            .map_err(|source| BossError::Io { path, source })?;
        let model = serde_json::from_reader(BufReader::new(file))?;
        Ok(model)
    }


    /// Delete the file of member `id`.
    /// A missing file is not an error.
    pub fn drop_member(&self, id: usize) {
        let path = self.path_of(id);
        match fs::remove_file(&path) {
            Ok(()) => {},
            Err(e) if e.kind() == io::ErrorKind::NotFound => {},
            Err(e) => {
                logging::warn(format!("Failed to remove {path:?}: {e}"));
            },
        }
    }


    fn write(&self, id: usize, model: &IndividualBoss) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|source| BossError::Io { path: self.dir.clone(), source })?;

        let path = self.path_of(id);
        let file = File::create(&path)
            .map_err(|source| BossError::Io { path: path.clone(), source })?;

        let result = write_json(file, model)
            .map_err(|source| BossError::Io { path: path.clone(), source });
        if result.is_err() {
            // A partial file must never be loaded back.
            let _ = fs::remove_file(&path);
        }
        result
    }
}


/// Serialize `model` into `writer` and flush it.
/// The flush must be explicit: dropping a `BufWriter` ignores its errors.
fn write_json<W: Write>(writer: W, model: &IndividualBoss) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer(&mut writer, model)?;
    writer.flush()
}
