//! Locale fallback resolution for translated attributes.
//!
//! A [`FallbackReader`] asks a [`ValueSource`] for an attribute's value in
//! the requested locale and, when that value is nil or blank, walks a
//! [`LocaleChain`] of fallback locales until it finds a usable one.
//!
//! The chain comes from:
//! - the backend's [`FallbackSpec`] (none, a [`FallbackGenerator`] such as
//!   [`LocaleFallbacks`], or a custom one-to-one mapping),
//! - the per-call [`FallbackOption`] in [`ReadOptions`],
//! - an override set for a dynamic scope with [`with_override`] or
//!   [`with_override_async`], which beats the per-call option.

mod chain;
mod context;
mod error;
mod locale;
mod option;
mod reader;
mod registry;
mod source;

pub use chain::{LocaleChain, DEFAULT_MAX_DEPTH};
pub use context::{current_override, override_depth, with_override, with_override_async};
pub use error::{FallbackError, SourceError};
pub use locale::{Ancestors, Locale};
pub use option::{FallbackOption, FallbackSpec};
pub use reader::{FallbackReader, ReadOptions, FALLBACK_KEY};
pub use registry::{FallbackGenerator, LocaleFallbacks, NoFallbacks};
pub use source::{is_blank, is_usable, Options, RecordedRead, RecordingSource, ValueSource};

/// Re-exported so callers can build values without naming `serde_json`.
pub use serde_json::Value;
