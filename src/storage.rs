use crate::model::{ConflictPair, Dataset, Shift, User};
use crate::scheduler::AssignOptions;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Port de persistance.
///
/// Les chargements ne remontent jamais d'erreur : un support absent ou
/// illisible donne une collection vide. Les sauvegardes sont atomiques.
pub trait Repository {
    fn load_users(&self) -> Vec<User>;
    fn save_users(&self, users: &[User]) -> anyhow::Result<()>;

    fn load_shifts(&self) -> Vec<Shift>;
    fn save_shifts(&self, shifts: &[Shift]) -> anyhow::Result<()>;

    fn load_conflicts(&self) -> Vec<ConflictPair>;
    fn save_conflicts(&self, conflicts: &[ConflictPair]) -> anyhow::Result<()>;

    fn load_settings(&self) -> AssignOptions;
    fn save_settings(&self, settings: &AssignOptions) -> anyhow::Result<()>;

    fn load_dataset(&self) -> Dataset {
        Dataset {
            users: self.load_users(),
            shifts: self.load_shifts(),
            conflicts: self.load_conflicts(),
        }
    }

    fn save_dataset(&self, dataset: &Dataset) -> anyhow::Result<()> {
        self.save_users(&dataset.users)?;
        self.save_shifts(&dataset.shifts)?;
        self.save_conflicts(&dataset.conflicts)?;
        Ok(())
    }
}

/// Un fichier JSON par collection dans un même répertoire.
#[derive(Debug, Clone)]
pub struct JsonRepository {
    dir: PathBuf,
}

const USERS_FILE: &str = "users.json";
const SHIFTS_FILE: &str = "shifts.json";
const CONFLICTS_FILE: &str = "conflicts.json";
const SETTINGS_FILE: &str = "settings.json";

impl JsonRepository {
    pub fn open<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).with_context(|| format!("creating data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        let path = self.dir.join(file);
        if !path.exists() {
            debug!(path = %path.display(), "no data file yet, starting empty");
            return T::default();
        }
        match read_json(&path) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %path.display(), error = %format!("{err:#}"), "unreadable data file, starting empty");
                T::default()
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> anyhow::Result<()> {
        write_json_atomic(&self.dir.join(file), value)
    }
}

impl Repository for JsonRepository {
    fn load_users(&self) -> Vec<User> {
        self.load_or_default(USERS_FILE)
    }

    fn save_users(&self, users: &[User]) -> anyhow::Result<()> {
        self.save(USERS_FILE, users)
    }

    fn load_shifts(&self) -> Vec<Shift> {
        self.load_or_default(SHIFTS_FILE)
    }

    fn save_shifts(&self, shifts: &[Shift]) -> anyhow::Result<()> {
        self.save(SHIFTS_FILE, shifts)
    }

    fn load_conflicts(&self) -> Vec<ConflictPair> {
        self.load_or_default(CONFLICTS_FILE)
    }

    fn save_conflicts(&self, conflicts: &[ConflictPair]) -> anyhow::Result<()> {
        self.save(CONFLICTS_FILE, conflicts)
    }

    fn load_settings(&self) -> AssignOptions {
        self.load_or_default(SETTINGS_FILE)
    }

    fn save_settings(&self, settings: &AssignOptions) -> anyhow::Result<()> {
        self.save(SETTINGS_FILE, settings)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let value = serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(value)
}

fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(value)?;
    let mut tmp = NamedTempFile::new_in(path.parent().unwrap_or_else(|| Path::new(".")))
        .with_context(|| "creating temp file")?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}
