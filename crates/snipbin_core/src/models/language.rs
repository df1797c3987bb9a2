//! Known language values with display labels and download extensions.

use serde::Serialize;

/// Label used for stored languages outside the known set.
pub const FALLBACK_LANGUAGE_LABEL: &str = "Other";
/// Extension used for stored languages outside the known set.
pub const FALLBACK_LANGUAGE_EXTENSION: &str = "txt";

/// Language option metadata for selectors and downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub value: &'static str,
    pub label: &'static str,
    pub extension: &'static str,
}

/// Known languages, in selector order.
pub const LANGUAGE_OPTIONS: &[LanguageOption] = &[
    LanguageOption {
        value: "text",
        label: "Plain Text",
        extension: "txt",
    },
    LanguageOption {
        value: "javascript",
        label: "JavaScript",
        extension: "js",
    },
    LanguageOption {
        value: "typescript",
        label: "TypeScript",
        extension: "ts",
    },
    LanguageOption {
        value: "python",
        label: "Python",
        extension: "py",
    },
    LanguageOption {
        value: "java",
        label: "Java",
        extension: "java",
    },
    LanguageOption {
        value: "cpp",
        label: "C++",
        extension: "cpp",
    },
    LanguageOption {
        value: "html",
        label: "HTML",
        extension: "html",
    },
    LanguageOption {
        value: "css",
        label: "CSS",
        extension: "css",
    },
    LanguageOption {
        value: "json",
        label: "JSON",
        extension: "json",
    },
    LanguageOption {
        value: "xml",
        label: "XML",
        extension: "xml",
    },
    LanguageOption {
        value: "sql",
        label: "SQL",
        extension: "sql",
    },
    LanguageOption {
        value: "bash",
        label: "Bash",
        extension: "sh",
    },
];

/// Look up a known language by its stored value (exact match).
pub fn find_language(value: &str) -> Option<&'static LanguageOption> {
    LANGUAGE_OPTIONS.iter().find(|option| option.value == value)
}

/// Whether `value` is one of the known language values.
pub fn is_known_language(value: &str) -> bool {
    find_language(value).is_some()
}

/// Display label for a stored language value.
pub fn language_label(value: &str) -> &'static str {
    find_language(value)
        .map(|option| option.label)
        .unwrap_or(FALLBACK_LANGUAGE_LABEL)
}

/// File extension (without dot) for a stored language value.
pub fn language_extension(value: &str) -> &'static str {
    find_language(value)
        .map(|option| option.extension)
        .unwrap_or(FALLBACK_LANGUAGE_EXTENSION)
}
