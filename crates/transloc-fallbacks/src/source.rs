//! The storage contract fallback reads run against.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;
use tracing::trace;

use crate::{Locale, SourceError};

/// Pass-through options forwarded verbatim to a [`ValueSource`].
pub type Options = BTreeMap<String, Value>;

/// Reads and writes one attribute's value per locale.
///
/// A source knows nothing about fallbacks. `Value::Null` stands for "no
/// value".
#[cfg_attr(test, mockall::automock)]
pub trait ValueSource {
    /// Read the value stored for `locale`.
    fn read(&self, locale: &Locale, options: &Options) -> Result<Value, SourceError>;

    /// Store `value` for `locale`.
    fn write(&mut self, locale: &Locale, value: Value, options: &Options) -> Result<(), SourceError>;
}

impl<S: ValueSource + ?Sized> ValueSource for Box<S> {
    fn read(&self, locale: &Locale, options: &Options) -> Result<Value, SourceError> {
        (**self).read(locale, options)
    }

    fn write(&mut self, locale: &Locale, value: Value, options: &Options) -> Result<(), SourceError> {
        (**self).write(locale, value, options)
    }
}

/// Values keyed by locale; a missing locale reads as `Null`.
impl ValueSource for BTreeMap<Locale, Value> {
    fn read(&self, locale: &Locale, _options: &Options) -> Result<Value, SourceError> {
        Ok(self.get(locale).cloned().unwrap_or(Value::Null))
    }

    fn write(&mut self, locale: &Locale, value: Value, _options: &Options) -> Result<(), SourceError> {
        if value.is_null() {
            self.remove(locale);
        } else {
            self.insert(locale.clone(), value);
        }
        Ok(())
    }
}

/// Whether `value` is nil or a whitespace-only string.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Whether a read result may be returned without trying further locales.
pub fn is_usable(value: &Value) -> bool {
    !is_blank(value)
}

/// One read observed by a [`RecordingSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRead {
    pub locale: Locale,
    pub options: Options,
}

/// Wraps a source and records every read in call order.
#[derive(Debug, Default)]
pub struct RecordingSource<S> {
    inner: S,
    reads: Mutex<Vec<RecordedRead>>,
}

impl<S> RecordingSource<S> {
    /// Wrap `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            reads: Mutex::new(Vec::new()),
        }
    }

    /// Reads recorded so far.
    pub fn reads(&self) -> Vec<RecordedRead> {
        self.lock().clone()
    }

    /// Locales read so far, in order.
    pub fn locales(&self) -> Vec<Locale> {
        self.lock().iter().map(|r| r.locale.clone()).collect()
    }

    /// Forget recorded reads.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// The wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap the source.
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedRead>> {
        self.reads.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S: ValueSource> ValueSource for RecordingSource<S> {
    fn read(&self, locale: &Locale, options: &Options) -> Result<Value, SourceError> {
        self.lock().push(RecordedRead {
            locale: locale.clone(),
            options: options.clone(),
        });
        let value = self.inner.read(locale, options);
        trace!(%locale, ?value, "recorded read");
        value
    }

    fn write(&mut self, locale: &Locale, value: Value, options: &Options) -> Result<(), SourceError> {
        self.inner.write(locale, value, options)
    }
}
