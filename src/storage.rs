use crate::model::Booking;
use std::cell::{Cell, RefCell};

#[cfg(feature = "serde")]
pub use self::files::{open_store, CsvStore, JsonStore, PendingFile};

/// Système de référence de la collection : lecture globale, remplacement global.
pub trait BookingStore {
    /// Lit toute la collection.
    fn read_all(&self) -> anyhow::Result<Vec<Booking>>;
    /// Remplace toute la collection ; aucun succès partiel n'est observable.
    fn replace_all(&self, bookings: &[Booking]) -> anyhow::Result<()>;
}

/// Store en mémoire, pour les tests et les usages embarqués.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bookings: RefCell<Vec<Booking>>,
    unavailable: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: RefCell::new(bookings),
            ..Self::default()
        }
    }

    /// Simule une panne (lecture et écriture échouent).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    pub fn snapshot(&self) -> Vec<Booking> {
        self.bookings.borrow().clone()
    }

    /// Nombre de `replace_all` réussis.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl BookingStore for MemoryStore {
    fn read_all(&self) -> anyhow::Result<Vec<Booking>> {
        if self.unavailable.get() {
            anyhow::bail!("memory store unavailable");
        }
        Ok(self.bookings.borrow().clone())
    }

    fn replace_all(&self, bookings: &[Booking]) -> anyhow::Result<()> {
        if self.unavailable.get() {
            anyhow::bail!("memory store unavailable");
        }
        *self.bookings.borrow_mut() = bookings.to_vec();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod files {
    use super::BookingStore;
    use crate::io;
    use crate::model::Booking;
    use crate::workflow::Pending;
    use anyhow::Context;
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::NamedTempFile;

    /// Choisit l'adaptateur d'après l'extension (`.csv` sinon JSON).
    pub fn open_store<P: AsRef<Path>>(path: P) -> anyhow::Result<Box<dyn BookingStore>> {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            Ok(Box::new(CsvStore::open(path)?))
        } else {
            Ok(Box::new(JsonStore::open(path)?))
        }
    }

    pub struct JsonStore {
        path: PathBuf,
    }

    impl JsonStore {
        pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
            Ok(Self {
                path: path.as_ref().to_path_buf(),
            })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl BookingStore for JsonStore {
        fn read_all(&self) -> anyhow::Result<Vec<Booking>> {
            if !self.path.exists() {
                return Ok(Vec::new());
            }
            let data =
                fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
            let mut bookings: Vec<Booking> = serde_json::from_slice(&data)
                .with_context(|| format!("parsing {}", self.path.display()))?;
            for booking in &mut bookings {
                // fichier édité à la main : même normalisation que `Booking::new`
                booking.member = booking.member.trim().to_owned();
                booking.validate().map_err(anyhow::Error::msg)?;
            }
            #[cfg(feature = "logging")]
            tracing::debug!(path = %self.path.display(), count = bookings.len(), "bookings loaded");
            Ok(bookings)
        }

        fn replace_all(&self, bookings: &[Booking]) -> anyhow::Result<()> {
            let json = serde_json::to_vec_pretty(bookings)?;
            write_atomic(&self.path, &json)?;
            #[cfg(feature = "logging")]
            tracing::debug!(path = %self.path.display(), count = bookings.len(), "bookings written");
            Ok(())
        }
    }

    /// Store tabulaire : header `member,start,end,color`, dates ISO.
    pub struct CsvStore {
        path: PathBuf,
    }

    impl CsvStore {
        pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
            Ok(Self {
                path: path.as_ref().to_path_buf(),
            })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl BookingStore for CsvStore {
        fn read_all(&self) -> anyhow::Result<Vec<Booking>> {
            if !self.path.exists() {
                return Ok(Vec::new());
            }
            let file = fs::File::open(&self.path)
                .with_context(|| format!("reading {}", self.path.display()))?;
            let bookings = io::read_bookings_csv(file)
                .with_context(|| format!("parsing {}", self.path.display()))?;
            #[cfg(feature = "logging")]
            tracing::debug!(path = %self.path.display(), count = bookings.len(), "bookings loaded");
            Ok(bookings)
        }

        fn replace_all(&self, bookings: &[Booking]) -> anyhow::Result<()> {
            let mut buf = Vec::new();
            io::write_bookings_csv(&mut buf, bookings)?;
            write_atomic(&self.path, &buf)?;
            #[cfg(feature = "logging")]
            tracing::debug!(path = %self.path.display(), count = bookings.len(), "bookings written");
            Ok(())
        }
    }

    /// Fichier compagnon qui garde la demande en attente entre deux invocations.
    #[derive(Debug, Clone)]
    pub struct PendingFile {
        path: PathBuf,
    }

    impl PendingFile {
        pub fn new<P: AsRef<Path>>(path: P) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
            }
        }

        /// `<store>.pending.json`, à côté du fichier de store.
        pub fn beside<P: AsRef<Path>>(store_path: P) -> Self {
            let store_path = store_path.as_ref();
            let mut name = store_path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_default();
            name.push(".pending.json");
            Self::new(store_path.with_file_name(name))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        pub fn load(&self) -> anyhow::Result<Option<Pending>> {
            if !self.path.exists() {
                return Ok(None);
            }
            let data =
                fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
            let pending: Pending = serde_json::from_slice(&data)
                .with_context(|| format!("parsing {}", self.path.display()))?;
            Ok(Some(pending))
        }

        pub fn save(&self, pending: &Pending) -> anyhow::Result<()> {
            let json = serde_json::to_vec_pretty(pending)?;
            write_atomic(&self.path, &json)
        }

        pub fn clear(&self) -> anyhow::Result<()> {
            if self.path.exists() {
                fs::remove_file(&self.path)
                    .with_context(|| format!("removing {}", self.path.display()))?;
            }
            Ok(())
        }
    }

    /// Écrit dans un fichier temporaire du même dossier puis renomme.
    fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(data)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)
            .with_context(|| format!("atomic rename to {}", path.display()))?;
        Ok(())
    }
}
