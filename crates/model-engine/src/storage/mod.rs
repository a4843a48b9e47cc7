//! Property storage for a model's data directory.

mod property_store;

pub use property_store::{DiskHandle, Property, PropertyStore, StorageTier};

use crate::config::EngineConfig;
use crate::locator::Cell;
use model_common::{GridDims, ModelError, ModelResult, PropertySample, SENTINEL};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Optional attenuation files. Query output always derives Q from Vs, so
/// these are never opened.
const IGNORED_FILES: [&str; 2] = ["qp.dat", "qs.dat"];

/// Overall state of the model's storage after initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageReadiness {
    /// Every property file found is held in memory.
    Ready,
    /// At least one property file found is read from disk per query.
    Degraded,
}

/// The stores for Vp, Vs and density.
#[derive(Debug)]
pub struct ModelStorage {
    data_dir: PathBuf,
    vp: PropertyStore,
    vs: PropertyStore,
    rho: PropertyStore,
}

impl ModelStorage {
    /// Open every property file found in `data_dir`.
    ///
    /// Fails with [`ModelError::NoBackingData`] when none is found.
    pub fn open(data_dir: &Path, dims: GridDims, config: &EngineConfig) -> ModelResult<Self> {
        let elements = dims.len_u64();
        let open = |property: Property| {
            PropertyStore::open(&data_dir.join(property.file_name()), elements, config)
        };

        let storage = Self {
            data_dir: data_dir.to_path_buf(),
            vp: open(Property::Vp)?,
            vs: open(Property::Vs)?,
            rho: open(Property::Rho)?,
        };

        for name in IGNORED_FILES {
            if data_dir.join(name).is_file() {
                debug!(file = name, "Ignoring attenuation file, Q is derived from Vs");
            }
        }

        if Property::ALL.iter().all(|&p| !storage.store(p).is_present()) {
            return Err(ModelError::NoBackingData(data_dir.to_path_buf()));
        }

        info!(
            data_dir = %data_dir.display(),
            elements,
            vp = ?storage.vp.tier(),
            vs = ?storage.vs.tier(),
            rho = ?storage.rho.tier(),
            "Opened model storage"
        );

        if storage.readiness() == StorageReadiness::Degraded {
            warn!(
                data_dir = %data_dir.display(),
                "Could not load model into memory. Reading the model from the hard disk may result in slow performance"
            );
        }

        Ok(storage)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store(&self, property: Property) -> &PropertyStore {
        match property {
            Property::Vp => &self.vp,
            Property::Vs => &self.vs,
            Property::Rho => &self.rho,
        }
    }

    /// Ready when every present store is in memory.
    pub fn readiness(&self) -> StorageReadiness {
        let all_resident = Property::ALL
            .iter()
            .map(|&p| self.store(p).tier())
            .all(|tier| tier != StorageTier::OnDisk);

        if all_resident {
            StorageReadiness::Ready
        } else {
            StorageReadiness::Degraded
        }
    }

    /// Read Vp, Vs and density at a linear index.
    ///
    /// Missing values, and the Q fields, are left at the sentinel.
    pub fn read_properties(&self, index: Option<u64>) -> PropertySample {
        let mut sample = PropertySample::NO_DATA;
        let Some(index) = index else {
            return sample;
        };

        let read = |store: &PropertyStore| store.read(index).map_or(SENTINEL, f64::from);
        sample.vp = read(&self.vp);
        sample.vs = read(&self.vs);
        sample.rho = read(&self.rho);
        sample
    }

    /// Read the eight corners of a cell, in the cell's corner order.
    pub fn read_cell(&self, cell: &Cell) -> [PropertySample; 8] {
        cell.indices.map(|index| self.read_properties(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_values(dir: &Path, name: &str, values: &[f32]) {
        let mut file = File::create(dir.join(name)).unwrap();
        file.write_all(bytemuck::cast_slice(values)).unwrap();
    }

    #[test]
    fn test_no_backing_data() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelStorage::open(dir.path(), GridDims::new(2, 2, 2), &EngineConfig::default())
            .unwrap_err();
        assert!(matches!(err, ModelError::NoBackingData(_)));
    }

    #[test]
    fn test_attenuation_files_alone_are_not_backing_data() {
        let dir = tempfile::tempdir().unwrap();
        write_values(dir.path(), "qp.dat", &[1.0; 8]);
        write_values(dir.path(), "qs.dat", &[1.0; 8]);
        let err = ModelStorage::open(dir.path(), GridDims::new(2, 2, 2), &EngineConfig::default())
            .unwrap_err();
        assert!(matches!(err, ModelError::NoBackingData(_)));
    }

    #[test]
    fn test_readiness() {
        let dir = tempfile::tempdir().unwrap();
        write_values(dir.path(), "vs.dat", &[500.0; 8]);
        let dims = GridDims::new(2, 2, 2);

        let storage = ModelStorage::open(dir.path(), dims, &EngineConfig::default()).unwrap();
        assert_eq!(storage.readiness(), StorageReadiness::Ready);
        assert_eq!(storage.store(Property::Vp).tier(), StorageTier::Absent);

        let storage = ModelStorage::open(dir.path(), dims, &EngineConfig::on_disk()).unwrap();
        assert_eq!(storage.readiness(), StorageReadiness::Degraded);
    }

    #[test]
    fn test_read_properties() {
        let dir = tempfile::tempdir().unwrap();
        write_values(dir.path(), "vp.dat", &[1.0, 2.0, 3.0, 4.0]);
        write_values(dir.path(), "density.dat", &[10.0, 20.0, 30.0, 40.0]);
        let storage =
            ModelStorage::open(dir.path(), GridDims::new(2, 2, 1), &EngineConfig::default()).unwrap();

        let sample = storage.read_properties(Some(2));
        assert_eq!(sample.vp, 3.0);
        assert_eq!(sample.vs, SENTINEL);
        assert_eq!(sample.rho, 30.0);
        assert_eq!(sample.qp, SENTINEL);
        assert_eq!(sample.qs, SENTINEL);

        assert!(storage.read_properties(None).is_no_data());
        assert!(storage.read_properties(Some(4)).is_no_data());
    }
}
