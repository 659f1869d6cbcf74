use std::error::Error;
use std::fmt;
use std::path::Path;
use std::sync::mpsc::Receiver;

use serde::Serialize;
use time::{Date, Month, OffsetDateTime};

use crate::collection::{ChangeEvent, TodoBook};
use crate::dates::CalendarDayFormatter;
use crate::domain::importance::{Importance, ParseImportanceError};
use crate::domain::item::TodoItem;
use crate::domain::parse_rfc3339;
use crate::sections::{self, SectionedView};
use crate::store::{self, StoreError};
use crate::workspace::{Config, ConfigError, StoreFormat, Workspace};

pub struct App {
    workspace: Workspace,
    config: Config,
    book: TodoBook,
    load_warning: Option<StoreError>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateItemPatch {
    pub text: Option<String>,
    pub importance: Option<String>,
    pub deadline: Option<String>,
    pub clear_deadline: bool,
    pub done: Option<bool>,
}

impl UpdateItemPatch {
    fn has_changes(&self) -> bool {
        self.text.is_some()
            || self.importance.is_some()
            || self.deadline.is_some()
            || self.clear_deadline
            || self.done.is_some()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportOutcome {
    pub added: u64,
    pub updated: u64,
}

impl App {
    /// Opens the data directory, loads config, and loads the collection in
    /// the configured format. A missing store file starts empty; any other
    /// load failure also starts empty but is kept as a warning so data
    /// trouble stays visible without taking the whole list down.
    pub fn open(data_dir: &Path) -> Result<Self, AppError> {
        let workspace = Workspace::open(data_dir);
        workspace.ensure_root()?;
        let config = workspace.load_config()?;

        let target = workspace.resolve(&config.file);
        let loaded = match config.format {
            StoreFormat::Json => store::load_json(&target),
            StoreFormat::Csv => store::load_csv(&target),
        };
        let (items, load_warning) = match loaded {
            Ok(items) => (items, None),
            Err(StoreError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                (Vec::new(), None)
            }
            Err(err) => (Vec::new(), Some(err)),
        };

        Ok(Self {
            workspace,
            config,
            book: TodoBook::from_items(items),
            load_warning,
        })
    }

    pub fn load_warning(&self) -> Option<&StoreError> {
        self.load_warning.as_ref()
    }

    #[allow(dead_code)]
    pub fn items(&self) -> &[TodoItem] {
        self.book.items()
    }

    #[allow(dead_code)]
    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        self.book.subscribe()
    }

    pub fn add(
        &mut self,
        text: &str,
        importance: Option<&str>,
        deadline: Option<&str>,
    ) -> Result<TodoItem, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::InvalidArgument(
                "item text must not be empty".to_string(),
            ));
        }

        let importance = match importance {
            Some(raw) => raw.parse()?,
            None => Importance::default(),
        };
        let deadline = deadline.map(parse_deadline).transpose()?;

        let item = TodoItem::new(text, importance, deadline);
        self.book.upsert(item.clone());
        self.persist()?;
        Ok(item)
    }

    pub fn show(&self, id: &str) -> Result<&TodoItem, AppError> {
        self.book
            .get(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    pub fn update(&mut self, id: &str, patch: UpdateItemPatch) -> Result<TodoItem, AppError> {
        if !patch.has_changes() {
            return Err(AppError::InvalidArgument(
                "nothing to update; pass at least one field".to_string(),
            ));
        }

        let mut item = self.show(id)?.clone();
        if let Some(text) = patch.text {
            let text = text.trim().to_string();
            if text.is_empty() {
                return Err(AppError::InvalidArgument(
                    "item text must not be empty".to_string(),
                ));
            }
            item.text = text;
        }
        if let Some(raw) = patch.importance {
            item.importance = raw.parse()?;
        }
        if patch.clear_deadline {
            item.deadline = None;
        } else if let Some(raw) = patch.deadline.as_deref() {
            item.deadline = Some(parse_deadline(raw)?);
        }
        if let Some(done) = patch.done {
            item.done = done;
        }
        item.touch();

        self.book.update(item.clone());
        self.persist()?;
        Ok(item)
    }

    pub fn set_done(&mut self, id: &str, done: bool) -> Result<TodoItem, AppError> {
        let mut item = self.show(id)?.clone();
        item.done = done;
        item.touch();

        self.book.update(item.clone());
        self.persist()?;
        Ok(item)
    }

    pub fn remove(&mut self, id: &str) -> Result<TodoItem, AppError> {
        let removed = self
            .book
            .remove(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        self.persist()?;
        Ok(removed)
    }

    /// Fresh derived view; never cached across calls.
    pub fn list(&self) -> SectionedView {
        sections::rebuild(self.book.items(), &CalendarDayFormatter)
    }

    pub fn export(&self, target: &Path, format: StoreFormat) -> Result<usize, AppError> {
        match format {
            StoreFormat::Json => store::save_json(self.book.items(), target)?,
            StoreFormat::Csv => store::save_csv(self.book.items(), target)?,
        }
        Ok(self.book.len())
    }

    /// Merges records from an external resource by id: known ids are
    /// replaced in place, new ids append.
    pub fn import(
        &mut self,
        source: &Path,
        format: StoreFormat,
    ) -> Result<ImportOutcome, AppError> {
        let incoming = match format {
            StoreFormat::Json => store::load_json(source)?,
            StoreFormat::Csv => store::load_csv(source)?,
        };

        let mut outcome = ImportOutcome {
            added: 0,
            updated: 0,
        };
        for item in incoming {
            if self.book.upsert(item) {
                outcome.updated += 1;
            } else {
                outcome.added += 1;
            }
        }
        self.persist()?;
        Ok(outcome)
    }

    fn persist(&self) -> Result<(), AppError> {
        let target = self.workspace.resolve(&self.config.file);
        match self.config.format {
            StoreFormat::Json => store::save_json(self.book.items(), &target)?,
            StoreFormat::Csv => store::save_csv(self.book.items(), &target)?,
        }
        Ok(())
    }
}

fn parse_deadline(raw: &str) -> Result<OffsetDateTime, AppError> {
    let trimmed = raw.trim();
    if let Some(parsed) = parse_rfc3339(trimmed) {
        return Ok(parsed);
    }
    parse_calendar_day(trimmed).ok_or_else(|| AppError::InvalidDeadline(raw.to_string()))
}

fn parse_calendar_day(raw: &str) -> Option<OffsetDateTime> {
    let mut parts = raw.splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;

    let month = Month::try_from(month).ok()?;
    let date = Date::from_calendar_date(year, month, day).ok()?;
    Some(date.midnight().assume_utc())
}

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Store(StoreError),
    Config(ConfigError),
    ParseImportance(ParseImportanceError),
    InvalidDeadline(String),
    InvalidArgument(String),
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "I/O error: {}", err),
            AppError::Store(err) => write!(f, "store error: {}", err),
            AppError::Config(err) => write!(f, "config error: {}", err),
            AppError::ParseImportance(err) => write!(f, "importance parse error: {}", err),
            AppError::InvalidDeadline(value) => {
                write!(
                    f,
                    "invalid deadline '{}', expected RFC3339 or YYYY-MM-DD",
                    value
                )
            }
            AppError::InvalidArgument(message) => write!(f, "{}", message),
            AppError::NotFound(id) => write!(f, "item '{}' not found", id),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Io(err) => Some(err),
            AppError::Store(err) => Some(err),
            AppError::Config(err) => Some(err),
            AppError::ParseImportance(err) => Some(err),
            AppError::InvalidDeadline(_) => None,
            AppError::InvalidArgument(_) => None,
            AppError::NotFound(_) => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        AppError::Store(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<ParseImportanceError> for AppError {
    fn from(value: ParseImportanceError) -> Self {
        AppError::ParseImportance(value)
    }
}
