// Version information for the Fabstir Gemini Relay

/// Full version string with feature description
pub const VERSION: &str = "v1.0.0-gemini-relay-2025-11-04";

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.0.0";

/// Major version number
pub const VERSION_MAJOR: u32 = 1;

/// Minor version number
pub const VERSION_MINOR: u32 = 0;

/// Patch version number
pub const VERSION_PATCH: u32 = 0;

/// Build date
pub const BUILD_DATE: &str = "2025-11-04";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "text-prompts",
    "inline-image-prompts",
    "cors-preflight",
    "provider-error-passthrough",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Fabstir Gemini Relay {} ({})", VERSION_NUMBER, BUILD_DATE)
}
