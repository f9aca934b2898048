use crate::parse::c::CHandler;
use crate::parse::javascript::JavaScriptHandler;
use crate::parse::python::PythonHandler;
use crate::parse::rust::RustHandler;
use crate::parse::{ExtractionStrategy, ImportHandler};

/// Supported language families, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageFamily {
    JavaScript,
    C,
    Python,
    Rust,
}

impl LanguageFamily {
    /// Extensions (with leading dot) whose files are scanned for imports.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            LanguageFamily::JavaScript => &[".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs"],
            LanguageFamily::C => &[".c", ".h", ".cc", ".cpp", ".cxx", ".hpp", ".hh", ".hxx"],
            LanguageFamily::Python => &[".py"],
            LanguageFamily::Rust => &[".rs"],
        }
    }

    /// Map an extension to its family. Matching is exact; `.JS` is not `.js`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        [
            LanguageFamily::JavaScript,
            LanguageFamily::C,
            LanguageFamily::Python,
            LanguageFamily::Rust,
        ]
        .into_iter()
        .find(|family| family.extensions().contains(&ext))
    }
}

/// One handler per language family, built for a given extraction strategy.
pub struct Registry {
    javascript: JavaScriptHandler,
    c: CHandler,
    python: PythonHandler,
    rust: RustHandler,
}

impl Registry {
    pub fn new(strategy: ExtractionStrategy) -> Self {
        Self {
            javascript: JavaScriptHandler::new(),
            c: CHandler::new(),
            python: PythonHandler::with_strategy(strategy),
            rust: RustHandler::with_strategy(strategy),
        }
    }

    /// Handler for a file extension such as `.ts`; `None` means "do not expand".
    pub fn handler_for(&self, ext: &str) -> Option<&dyn ImportHandler> {
        let handler: &dyn ImportHandler = match LanguageFamily::from_extension(ext)? {
            LanguageFamily::JavaScript => &self.javascript,
            LanguageFamily::C => &self.c,
            LanguageFamily::Python => &self.python,
            LanguageFamily::Rust => &self.rust,
        };
        Some(handler)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(ExtractionStrategy::default())
    }
}
