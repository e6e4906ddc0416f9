use {
    anyhow::Result,
    std::{
        fmt::Arguments,
        fs::{File, OpenOptions, create_dir_all},
        io::Write,
        path::PathBuf,
        str::FromStr,
        sync::Mutex,
        time::{SystemTime, UNIX_EPOCH},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Debug => write!(f, "DEBUG"),
            Level::Info => write!(f, "INFO"),
            Level::Warn => write!(f, "WARN"),
            Level::Error => write!(f, "ERROR"),
            Level::Fatal => write!(f, "FATAL"),
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

pub trait Logger: Send + Sync {
    fn log(&self, level: Level, file: &str, line: usize, message: &str);
}

pub struct Installed {
    logger: Box<dyn Logger>,
    min_level: Level,
}

pub static LOGGER: Mutex<Option<Installed>> = Mutex::new(None);

/// Routes one record to the installed logger, if any, honouring its level filter.
pub fn emit(level: Level, file: &str, line: usize, args: Arguments<'_>) {
    let guard = LOGGER.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(installed) = guard.as_ref() {
        if level >= installed.min_level {
            installed.logger.log(level, file, line, &args.to_string());
        }
    }
}

pub fn install(logger: Box<dyn Logger>, min_level: Level) {
    LOGGER
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .replace(Installed { logger, min_level });
}

pub fn format_timestamp() -> String {
    let secs = unix_secs();
    let days = secs / 86400;
    let time_of_day = secs % 86400;
    let (year, month, day) = civil_from_days(days as i64);
    let hours = time_of_day / 3600;
    let minutes = (time_of_day % 3600) / 60;
    let seconds = time_of_day % 60;
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year, month, day, hours, minutes, seconds
    )
}

pub fn format_today() -> String {
    let days = unix_secs() / 86400;
    let (year, month, day) = civil_from_days(days as i64);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

fn unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// days since 1970-01-01 to a proleptic gregorian (year, month, day)
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

fn format_line(level: Level, file: &str, line: usize, message: &str) -> String {
    format!(
        "[{}:{} - {}:{}] {}",
        level,
        format_timestamp(),
        file,
        line,
        message
    )
}

/// Writes records to stdout, warnings and worse to stderr.
pub struct StdoutLogger;

impl Logger for StdoutLogger {
    fn log(&self, level: Level, file: &str, line: usize, message: &str) {
        let text = format_line(level, file, line, message);
        if level >= Level::Warn {
            eprintln!("{}", text);
        } else {
            println!("{}", text);
        }
    }
}

pub fn init_stdout_logger(min_level: Level) {
    install(Box::new(StdoutLogger), min_level);
}

struct FileLoggerState {
    dir: PathBuf,
    current_date: String,
    file: File,
}

/// Appends records to `<dir>/<YYYY-MM-DD>.log`, switching files when the date changes.
pub struct FileLogger {
    state: Mutex<FileLoggerState>,
}

impl FileLogger {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        create_dir_all(&dir)?;
        let current_date = format_today();
        let file = open_day_file(&dir, &current_date)?;
        Ok(FileLogger {
            state: Mutex::new(FileLoggerState {
                dir,
                current_date,
                file,
            }),
        })
    }
}

fn open_day_file(dir: &PathBuf, date: &str) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(format!("{}.log", date)))
}

impl Logger for FileLogger {
    fn log(&self, level: Level, file: &str, line: usize, message: &str) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let today = format_today();
        if today != state.current_date {
            match open_day_file(&state.dir, &today) {
                Ok(new_file) => {
                    state.file = new_file;
                    state.current_date = today;
                }
                Err(error) => {
                    eprintln!("failed to roll log file in {:?}: {}", state.dir, error);
                }
            }
        }
        let mut text = format_line(level, file, line, message);
        text.push('\n');
        if let Err(error) = state.file.write_all(text.as_bytes()) {
            eprintln!("failed to write log file: {}", error);
            eprintln!("{}", text.trim_end());
        }
    }
}

pub fn init_file_logger(dir: impl Into<PathBuf>, min_level: Level) -> Result<()> {
    install(Box::new(FileLogger::new(dir)?), min_level);
    Ok(())
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{ base::log::emit(base::log::Level::Debug, file!(), line!() as usize, format_args!($($arg)*)); }};
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{ base::log::emit(base::log::Level::Info, file!(), line!() as usize, format_args!($($arg)*)); }};
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{ base::log::emit(base::log::Level::Warn, file!(), line!() as usize, format_args!($($arg)*)); }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{ base::log::emit(base::log::Level::Error, file!(), line!() as usize, format_args!($($arg)*)); }};
}

/// Logs at fatal level, prints the diagnostic to stderr and exits with status 1.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {{ let message = format_args!($($arg)*).to_string(); base::log::emit(base::log::Level::Fatal, file!(), line!() as usize, format_args!("{}", message)); eprintln!("FATAL ERROR: {}", message); std::process::exit(1); }};
}
