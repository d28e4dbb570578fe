//! Size-rotating file writer with age/count retention and optional gzip
//!
//! The active file is always written at the configured path. When a write
//! would push it past the size threshold, the file is renamed to a
//! timestamped backup (`<file_name>.<YYYY-MM-DDTHH-MM-SS.mmm>`) and a fresh
//! file is opened. After each rotation old backups are pruned by count and
//! by age, and the survivors are gzip-compressed if requested.

use super::destination::Destination;
use crate::core::error::{LoggerError, Result};
use chrono::{Local, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const MEGABYTE: u64 = 1024 * 1024;
const DEFAULT_MAX_ROTATED_SIZE: i64 = 100;
const DEFAULT_MAX_RETAIN_DAYS: i64 = 7;
const DEFAULT_MAX_RETAIN_FILES: i64 = 3;

const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";
/// Length of a formatted backup timestamp, e.g. `2024-01-02T03-04-05.678`
const BACKUP_TIME_LEN: usize = 23;
const COMPRESS_SUFFIX: &str = ".gz";
/// Partial output of an interrupted compression
const COMPRESS_TEMP_SUFFIX: &str = ".gz.tmp";

/// Configuration for the rotating file writer
///
/// Zero numeric fields take their defaults (100 MB, 7 days, 3 files).
///
/// # Examples
///
/// ```
/// use tslog::writer::RotatingFileConfig;
///
/// let config = RotatingFileConfig::new("/var/log/app.log")
///     .with_max_rotated_size(50)
///     .with_max_retain_files(10)
///     .with_compress(true);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotatingFileConfig {
    /// Path of the active log file; parent directories are created on demand
    pub file_path: PathBuf,
    /// Size in megabytes at which the active file is rotated
    pub max_rotated_size: i64,
    /// Days a backup is kept, judged by the timestamp in its name
    pub max_retain_days: i64,
    /// Number of backups kept
    pub max_retain_files: i64,
    /// Use local time for backup names instead of UTC
    pub local_time: bool,
    /// Gzip backups after rotation
    pub compress: bool,
}

impl RotatingFileConfig {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_rotated_size(mut self, megabytes: i64) -> Self {
        self.max_rotated_size = megabytes;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_retain_days(mut self, days: i64) -> Self {
        self.max_retain_days = days;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_retain_files(mut self, count: i64) -> Self {
        self.max_retain_files = count;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_local_time(mut self, enabled: bool) -> Self {
        self.local_time = enabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compress(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    /// Reject an empty path and negative numeric fields
    pub fn validate(&self) -> Result<()> {
        let problem = if self.file_path.as_os_str().is_empty() {
            "file path cannot be empty"
        } else if self.max_rotated_size < 0 {
            "max rotated size cannot be negative"
        } else if self.max_retain_days < 0 {
            "max retain days cannot be negative"
        } else if self.max_retain_files < 0 {
            "max retain files cannot be negative"
        } else {
            return Ok(());
        };

        Err(LoggerError::config(
            "RotatingFileConfig",
            format!("invalid rotating file config: {}", problem),
        ))
    }

    /// Replace zero numeric fields with their defaults
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        if self.max_rotated_size == 0 {
            self.max_rotated_size = DEFAULT_MAX_ROTATED_SIZE;
        }
        if self.max_retain_days == 0 {
            self.max_retain_days = DEFAULT_MAX_RETAIN_DAYS;
        }
        if self.max_retain_files == 0 {
            self.max_retain_files = DEFAULT_MAX_RETAIN_FILES;
        }
        self
    }

    /// Rotation threshold in bytes
    pub fn max_size_bytes(&self) -> u64 {
        (self.max_rotated_size.max(0) as u64).saturating_mul(MEGABYTE)
    }
}

/// Rotating file writer
///
/// # Examples
///
/// ```no_run
/// use tslog::writer::{RotatingFileConfig, RotatingFileWriter};
/// use std::io::Write;
///
/// let mut writer = RotatingFileWriter::new(RotatingFileConfig::new("/var/log/app.log")).unwrap();
/// writer.write_all(b"hello\n").unwrap();
/// ```
#[derive(Debug)]
pub struct RotatingFileWriter {
    config: RotatingFileConfig,
    file: Option<File>,
    current_size: u64,
}

impl RotatingFileWriter {
    /// Validate the configuration, apply defaults and open the file for append
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the file cannot be opened
    pub fn new(config: RotatingFileConfig) -> Result<Self> {
        config.validate()?;
        let config = config.with_defaults();

        let (file, current_size) = open_append(&config.file_path)?;

        Ok(Self {
            config,
            file: Some(file),
            current_size,
        })
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.file_path
    }

    /// Effective configuration, defaults applied
    #[must_use]
    pub fn config(&self) -> &RotatingFileConfig {
        &self.config
    }

    /// Close the active file, move it to a backup and start a new one
    pub fn rotate(&mut self) -> Result<()> {
        // Drop the handle before renaming
        self.file.take();

        let path = self.config.file_path.clone();
        if path.exists() {
            let backup = self.backup_path();
            fs::rename(&path, &backup).map_err(|e| {
                LoggerError::file_rotation(
                    path.display().to_string(),
                    format!("Failed to rename to {}: {}", backup.display(), e),
                )
            })?;
        }

        let (file, size) = open_append(&path)?;
        self.file = Some(file);
        self.current_size = size;

        self.mill();
        Ok(())
    }

    fn now_naive(&self) -> NaiveDateTime {
        if self.config.local_time {
            Local::now().naive_local()
        } else {
            Utc::now().naive_utc()
        }
    }

    /// Timestamped backup path, with a `-N` suffix if the name is taken
    fn backup_path(&self) -> PathBuf {
        let file_name = file_name_of(&self.config.file_path);
        let stamp = self.now_naive().format(BACKUP_TIME_FORMAT).to_string();
        let base = self
            .config
            .file_path
            .with_file_name(format!("{}.{}", file_name, stamp));

        let taken = |p: &Path| p.exists() || append_suffix(p, COMPRESS_SUFFIX).exists();
        if !taken(&base) {
            return base;
        }
        (1..)
            .map(|n| append_suffix(&base, &format!("-{}", n)))
            .find(|candidate| !taken(candidate))
            .unwrap_or(base)
    }

    /// Backups of this file, newest first. Leftover compression temp files
    /// are not backups and are skipped.
    fn backups(&self) -> io::Result<Vec<Backup>> {
        let prefix = self.backup_prefix();
        let mut backups = Vec::new();
        for (name, path) in self.related_files()? {
            if name.ends_with(COMPRESS_TEMP_SUFFIX) {
                continue;
            }
            let Some(rest) = name.strip_prefix(&prefix) else {
                continue;
            };
            let Some(stamp) = rest.get(..BACKUP_TIME_LEN) else {
                continue;
            };
            let Ok(time) = NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT) else {
                continue;
            };
            backups.push(Backup {
                compressed: name.ends_with(COMPRESS_SUFFIX),
                path,
                name,
                time,
            });
        }

        backups.sort_by(|a, b| b.time.cmp(&a.time).then_with(|| b.name.cmp(&a.name)));
        Ok(backups)
    }

    fn backup_prefix(&self) -> String {
        format!("{}.", file_name_of(&self.config.file_path))
    }

    /// Regular files next to the active one whose names start with `<file_name>.`
    fn related_files(&self) -> io::Result<Vec<(String, PathBuf)>> {
        let dir = parent_dir(&self.config.file_path);
        let prefix = self.backup_prefix();

        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(&prefix) {
                files.push((name, entry.path()));
            }
        }
        Ok(files)
    }

    fn remove_stale_temps(&self) -> io::Result<()> {
        for (name, path) in self.related_files()? {
            if name.ends_with(COMPRESS_TEMP_SUFFIX) {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    /// Apply retention and compression to existing backups
    fn mill(&self) {
        if self.config.compress {
            if let Err(e) = self.remove_stale_temps() {
                eprintln!(
                    "[tslog WARN] Failed to remove stale compression files of {}: {}",
                    self.config.file_path.display(),
                    e
                );
            }
        }

        let backups = match self.backups() {
            Ok(backups) => backups,
            Err(e) => {
                eprintln!(
                    "[tslog WARN] Failed to list backups of {}: {}",
                    self.config.file_path.display(),
                    e
                );
                return;
            }
        };

        let keep = self.config.max_retain_files.max(0) as usize;
        let cutoff = TimeDelta::try_days(self.config.max_retain_days)
            .and_then(|age| self.now_naive().checked_sub_signed(age));

        for (index, backup) in backups.iter().enumerate() {
            let expired = cutoff.is_some_and(|cutoff| backup.time < cutoff);
            if index >= keep || expired {
                if let Err(e) = fs::remove_file(&backup.path) {
                    eprintln!(
                        "[tslog WARN] Failed to remove old backup {}: {}",
                        backup.path.display(),
                        e
                    );
                }
            } else if self.config.compress && !backup.compressed {
                if let Err(e) = compress_file(&backup.path) {
                    eprintln!("[tslog WARN] {}", e);
                }
            }
        }
    }
}

impl RotatingFileWriter {
    /// Reject oversized writes and rotate if `length` more bytes would not fit
    fn make_room(&mut self, length: u64) -> io::Result<&mut File> {
        let max = self.config.max_size_bytes();
        if length > max {
            return Err(LoggerError::WriteTooLarge { length, max }.into());
        }

        if self.file.is_none() || self.current_size + length > max {
            self.rotate()?;
        }

        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "log file is not open"))
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.make_room(buf.len() as u64)?.write(buf)?;
        self.current_size += written as u64;
        Ok(written)
    }

    // A record must not be split across two files
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.make_room(buf.len() as u64)?.write_all(buf)?;
        self.current_size += buf.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

#[derive(Debug)]
struct Backup {
    path: PathBuf,
    name: String,
    time: NaiveDateTime,
    compressed: bool,
}

fn open_append(path: &Path) -> Result<(File, u64)> {
    let dir = parent_dir(path);
    fs::create_dir_all(dir).map_err(|e| {
        LoggerError::io_operation(
            "create log directory",
            format!("Failed to create directory '{}'", dir.display()),
            e,
        )
    })?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            LoggerError::io_operation(
                "open log file",
                format!("Failed to open '{}'", path.display()),
                e,
            )
        })?;

    let size = file
        .metadata()
        .map_err(|e| {
            LoggerError::io_operation(
                "open log file",
                format!("Cannot access metadata of '{}'", path.display()),
                e,
            )
        })?
        .len();

    Ok((file, size))
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tslog.log".to_string())
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(suffix);
    PathBuf::from(os)
}

/// Gzip a backup next to itself, removing the original only on success
fn compress_file(path: &Path) -> Result<()> {
    use std::io::{BufReader, BufWriter};

    let gz_path = append_suffix(path, COMPRESS_SUFFIX);
    let temp_gz_path = append_suffix(path, COMPRESS_TEMP_SUFFIX);

    let input = File::open(path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to open file for compression: {}", path.display()),
            e,
        )
    })?;
    let mut reader = BufReader::with_capacity(64 * 1024, input);

    let output = File::create(&temp_gz_path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to create temporary compressed file: {}", temp_gz_path.display()),
            e,
        )
    })?;
    let buffered_output = BufWriter::with_capacity(64 * 1024, output);
    let mut encoder =
        flate2::write::GzEncoder::new(buffered_output, flate2::Compression::default());

    let streamed = io::copy(&mut reader, &mut encoder)
        .and_then(|_| encoder.finish())
        .and_then(|mut out| out.flush());
    if let Err(e) = streamed {
        let _ = fs::remove_file(&temp_gz_path);
        return Err(LoggerError::io_operation(
            "compress log file",
            format!("Failed to compress {}", path.display()),
            e,
        ));
    }

    fs::rename(&temp_gz_path, &gz_path).map_err(|e| {
        let _ = fs::remove_file(&temp_gz_path);
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to rename compressed file to: {}", gz_path.display()),
            e,
        )
    })?;

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[tslog WARN] Compression succeeded but failed to remove original file {}: {}",
            path.display(),
            e
        );
    }

    Ok(())
}

/// Build a rotating file destination
///
/// # Errors
///
/// Returns `LoggerError::InvalidConfiguration` for an empty path or negative
/// numeric fields, or an IO error if the file cannot be opened.
pub fn new_rotating_file_writer(config: RotatingFileConfig) -> Result<Destination> {
    let writer = RotatingFileWriter::new(config)?;
    Ok(Destination::named("file", writer))
}

/// Like [`new_rotating_file_writer`] but panics on failure
///
/// # Panics
///
/// Panics if the configuration is invalid or the file cannot be opened
pub fn must_new_rotating_file_writer(config: RotatingFileConfig) -> Destination {
    match new_rotating_file_writer(config) {
        Ok(destination) => destination,
        Err(e) => panic!("{}", e),
    }
}
