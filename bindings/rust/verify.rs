//! Load checks for compiled grammars.
//!
//! A [`GrammarLoader`] is the only thing the check knows about a grammar: a
//! name to report and a way to turn the compiled artifact into a runtime
//! handle. [`load`] runs that construction once and classifies every way it
//! can go wrong as a [`ConstructionFailure`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tree_sitter::{Language, Parser};

/// Why a grammar could not be turned into a usable handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionFailure {
    #[error("Error loading {grammar} grammar")]
    NullHandle { grammar: String },

    #[error(
        "Error loading {grammar} grammar: ABI version {version} is not between {min} and {max}"
    )]
    IncompatibleVersion {
        grammar: String,
        version: usize,
        min: usize,
        max: usize,
    },

    #[error("Error loading {grammar} grammar: constructor panicked: {message}")]
    Panicked { grammar: String, message: String },
}

impl ConstructionFailure {
    /// Name of the grammar that failed to load.
    pub fn grammar(&self) -> &str {
        match self {
            Self::NullHandle { grammar }
            | Self::IncompatibleVersion { grammar, .. }
            | Self::Panicked { grammar, .. } => grammar,
        }
    }
}

/// Something that can build a runtime handle for a single grammar.
pub trait GrammarLoader {
    type Handle;

    /// Name used in diagnostics, e.g. `Lab1`.
    fn name(&self) -> &str;

    /// Builds a fresh handle. Each call is independent of the previous ones.
    fn construct(&self) -> Result<Self::Handle, ConstructionFailure>;
}

/// Constructs the grammar behind `loader` and returns its handle.
///
/// A panic raised while constructing is caught and reported as
/// [`ConstructionFailure::Panicked`] so that a broken grammar fails the check
/// instead of tearing down the caller.
///
/// # Errors
///
/// Returns whatever [`ConstructionFailure`] the loader reports, or
/// [`ConstructionFailure::Panicked`] if it unwinds.
pub fn load<L: GrammarLoader>(loader: &L) -> Result<L::Handle, ConstructionFailure> {
    match panic::catch_unwind(AssertUnwindSafe(|| loader.construct())) {
        Ok(result) => result,
        Err(payload) => Err(ConstructionFailure::Panicked {
            grammar: loader.name().to_owned(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}

/// Loads a grammar through the Tree-sitter runtime.
///
/// The constructor is the `tree_sitter_<name>` symbol exported by the
/// generated parser. The handle it returns is only accepted once a
/// [`Parser`] agrees to use it, which is where the runtime checks the ABI
/// version of the compiled tables.
#[derive(Debug, Clone, Copy)]
pub struct TreeSitterLoader {
    name: &'static str,
    constructor: fn() -> Language,
}

impl TreeSitterLoader {
    pub const fn new(name: &'static str, constructor: fn() -> Language) -> Self {
        Self { name, constructor }
    }

    /// Loads the grammar and returns a [`Parser`] set up to use it.
    ///
    /// # Errors
    ///
    /// Fails the same way [`load`] does for this loader.
    pub fn parser(&self) -> Result<Parser, ConstructionFailure> {
        let language = load(self)?;
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|_| self.incompatible(&language))?;
        Ok(parser)
    }

    fn incompatible(&self, language: &Language) -> ConstructionFailure {
        ConstructionFailure::IncompatibleVersion {
            grammar: self.name.to_owned(),
            version: language.version(),
            min: tree_sitter::MIN_COMPATIBLE_LANGUAGE_VERSION,
            max: tree_sitter::LANGUAGE_VERSION,
        }
    }
}

impl GrammarLoader for TreeSitterLoader {
    type Handle = Language;

    fn name(&self) -> &str {
        self.name
    }

    fn construct(&self) -> Result<Language, ConstructionFailure> {
        let raw = (self.constructor)().into_raw();
        if raw.is_null() {
            return Err(ConstructionFailure::NullHandle {
                grammar: self.name.to_owned(),
            });
        }
        // SAFETY: `raw` came out of a `Language` and was just checked to be non-null.
        let language = unsafe { Language::from_raw(raw) };

        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|_| self.incompatible(&language))?;

        Ok(language)
    }
}
