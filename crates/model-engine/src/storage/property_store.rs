//! Tiered storage for a single property grid.
//!
//! A property file is a flat sequence of native-endian `f32` values, one per
//! grid point. It is either loaded whole into memory or kept open and read
//! one value at a time.

use crate::config::EngineConfig;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Size of one stored value in bytes.
const VALUE_SIZE: u64 = std::mem::size_of::<f32>() as u64;

/// A property stored in the model's data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Vp,
    Vs,
    Rho,
}

impl Property {
    pub const ALL: [Property; 3] = [Property::Vp, Property::Vs, Property::Rho];

    /// Name of the property file inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Property::Vp => "vp.dat",
            Property::Vs => "vs.dat",
            Property::Rho => "density.dat",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Property::Vp => "vp",
            Property::Vs => "vs",
            Property::Rho => "rho",
        }
    }
}

/// Where a property's values live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageTier {
    Absent,
    OnDisk,
    InMemory,
}

/// An open property file read one value at a time.
///
/// The seek and the read share one file position, so they happen under a
/// single lock.
#[derive(Debug)]
pub struct DiskHandle {
    path: PathBuf,
    file: Mutex<File>,
}

impl DiskHandle {
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(File::open(path)?),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the value at `index`, or `None` past the end of the file.
    pub fn read(&self, index: u64) -> Option<f32> {
        let mut file = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let mut bytes = [0u8; VALUE_SIZE as usize];
        let result = file
            .seek(SeekFrom::Start(index * VALUE_SIZE))
            .and_then(|_| file.read_exact(&mut bytes));

        match result {
            Ok(()) => Some(f32::from_ne_bytes(bytes)),
            Err(e) => {
                debug!(path = %self.path.display(), index, error = %e, "Property read failed");
                None
            }
        }
    }
}

/// Storage for one property grid.
#[derive(Debug)]
pub enum PropertyStore {
    /// No file for this property.
    Absent,
    /// Values are read from disk on every lookup.
    OnDisk(DiskHandle),
    /// All `nx * ny * nz` values, read-only after loading.
    InMemory(Vec<f32>),
}

impl PropertyStore {
    /// Open a property file holding `elements` values.
    ///
    /// Missing files give [`PropertyStore::Absent`]. Files are loaded into
    /// memory when the engine configuration allows a grid of this size and
    /// the allocation succeeds; otherwise the file stays open on disk.
    pub fn open(path: &Path, elements: u64, config: &EngineConfig) -> io::Result<Self> {
        if !path.is_file() {
            return Ok(PropertyStore::Absent);
        }

        if !config.allows_resident(elements) {
            debug!(path = %path.display(), elements, "Property kept on disk");
            return Ok(PropertyStore::OnDisk(DiskHandle::open(path)?));
        }

        match load_values(path, elements)? {
            Some(values) => Ok(PropertyStore::InMemory(values)),
            None => Ok(PropertyStore::OnDisk(DiskHandle::open(path)?)),
        }
    }

    /// Read the value at a linear index.
    ///
    /// Returns `None` when the store is absent or the index lies outside
    /// the stored values.
    pub fn read(&self, index: u64) -> Option<f32> {
        match self {
            PropertyStore::Absent => None,
            PropertyStore::OnDisk(handle) => handle.read(index),
            PropertyStore::InMemory(values) => {
                usize::try_from(index).ok().and_then(|i| values.get(i).copied())
            }
        }
    }

    pub fn tier(&self) -> StorageTier {
        match self {
            PropertyStore::Absent => StorageTier::Absent,
            PropertyStore::OnDisk(_) => StorageTier::OnDisk,
            PropertyStore::InMemory(_) => StorageTier::InMemory,
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, PropertyStore::Absent)
    }
}

/// Read a whole property file into memory.
///
/// Returns `Ok(None)` when the buffer cannot be allocated or the file holds
/// fewer values than the grid; the caller then falls back to disk reads.
fn load_values(path: &Path, elements: u64) -> io::Result<Option<Vec<f32>>> {
    let Ok(count) = usize::try_from(elements) else {
        return Ok(None);
    };

    let mut values: Vec<f32> = Vec::new();
    if let Err(e) = values.try_reserve_exact(count) {
        warn!(path = %path.display(), elements, error = %e, "Could not allocate property grid, reading from disk");
        return Ok(None);
    }
    values.resize(count, 0.0);

    let mut file = File::open(path)?;
    match file.read_exact(bytemuck::cast_slice_mut(&mut values)) {
        Ok(()) => Ok(Some(values)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            warn!(path = %path.display(), elements, "Property file shorter than grid, reading from disk");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_values(dir: &Path, name: &str, values: &[f32]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(bytemuck::cast_slice(values)).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = PropertyStore::open(&dir.path().join("vp.dat"), 8, &EngineConfig::default()).unwrap();
        assert_eq!(store.tier(), StorageTier::Absent);
        assert!(!store.is_present());
        assert_eq!(store.read(0), None);
    }

    #[test]
    fn test_in_memory_reads() {
        let dir = tempfile::tempdir().unwrap();
        let values: Vec<f32> = (0..8).map(|v| v as f32 * 1.5).collect();
        let path = write_values(dir.path(), "vs.dat", &values);

        let store = PropertyStore::open(&path, 8, &EngineConfig::default()).unwrap();
        assert_eq!(store.tier(), StorageTier::InMemory);
        assert_eq!(store.read(0), Some(0.0));
        assert_eq!(store.read(7), Some(10.5));
        assert_eq!(store.read(8), None);
    }

    #[test]
    fn test_on_disk_reads_match_memory() {
        let dir = tempfile::tempdir().unwrap();
        let values: Vec<f32> = (0..27).map(|v| 1000.0 + v as f32).collect();
        let path = write_values(dir.path(), "density.dat", &values);

        let memory = PropertyStore::open(&path, 27, &EngineConfig::default()).unwrap();
        let disk = PropertyStore::open(&path, 27, &EngineConfig::on_disk()).unwrap();
        assert_eq!(disk.tier(), StorageTier::OnDisk);

        for index in 0..27 {
            assert_eq!(memory.read(index), disk.read(index));
        }
        assert_eq!(disk.read(27), None);
    }

    #[test]
    fn test_large_grid_stays_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_values(dir.path(), "vp.dat", &[1.0, 2.0, 3.0, 4.0]);
        let config = EngineConfig {
            max_resident_elements: 3,
            force_on_disk: false,
        };

        let store = PropertyStore::open(&path, 4, &config).unwrap();
        assert_eq!(store.tier(), StorageTier::OnDisk);
        assert_eq!(store.read(3), Some(4.0));
    }

    #[test]
    fn test_unaddressable_grid_stays_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_values(dir.path(), "vs.dat", &[7.0, 8.0]);

        // Saturated element count of an overflowing grid
        let store = PropertyStore::open(&path, u64::MAX, &EngineConfig::default()).unwrap();
        assert_eq!(store.tier(), StorageTier::OnDisk);
        assert_eq!(store.read(1), Some(8.0));
    }

    #[test]
    fn test_short_file_falls_back_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_values(dir.path(), "vp.dat", &[1.0, 2.0]);

        let store = PropertyStore::open(&path, 4, &EngineConfig::default()).unwrap();
        assert_eq!(store.tier(), StorageTier::OnDisk);
        assert_eq!(store.read(1), Some(2.0));
        assert_eq!(store.read(2), None);
    }

    #[test]
    fn test_property_file_names() {
        assert_eq!(Property::Vp.file_name(), "vp.dat");
        assert_eq!(Property::Vs.file_name(), "vs.dat");
        assert_eq!(Property::Rho.file_name(), "density.dat");
    }
}
