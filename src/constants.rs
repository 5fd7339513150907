//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// USER ROLES
// =============================================================================

/// Role identifiers carried in the `role` claim of a bearer token
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const EVENT_ADMIN: &str = "event-admin";

    /// Roles allowed to change events and their resources
    pub const EVENT_WRITERS: &[&str] = &[ADMIN, EVENT_ADMIN];
}

// =============================================================================
// COMPETITION FORMATS
// =============================================================================

/// Starting order policies
pub mod starting_orders {
    pub const DRAW: &str = "Draw";
    pub const GROUP: &str = "Group starting order";
    pub const HEAT: &str = "Heat starting order";

    pub const ALL: &[&str] = &[DRAW, GROUP, HEAT];
}

/// Start procedures
pub mod start_procedures {
    pub const INTERVAL_START: &str = "Interval start";
    pub const MASS_START: &str = "Mass start";
    pub const HEAT_START: &str = "Heat start";

    pub const ALL: &[&str] = &[INTERVAL_START, MASS_START, HEAT_START];
}

// =============================================================================
// EVENTS
// =============================================================================

/// Timezone assigned to events created without one
pub const DEFAULT_EVENT_TIMEZONE: &str = "Europe/Oslo";

/// First bib number handed out when no start value is requested
pub const DEFAULT_START_BIB: i32 = 1;

// =============================================================================
// RACECLASSES
// =============================================================================

/// Naming rules used when no raceclasses configuration file is given.
///
/// Applied in order to the ageclass label with whitespace removed.
pub const DEFAULT_NAMING_RULES: &[(&str, &str)] = &[
    ("Jenter", "J"),
    ("Gutter", "G"),
    ("Menn", "M"),
    ("Herrer", "M"),
    ("Kvinner", "K"),
    ("Damer", "K"),
    ("Para", "P"),
    ("senior", "S"),
    ("Senior", "S"),
    ("junior", "J"),
    ("Junior", "J"),
    ("Felles", "F"),
    ("år", ""),
];

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum length of names (events, formats, raceclasses, persons)
pub const MAX_NAME_LENGTH: u64 = 256;

/// Maximum length of free-text event information
pub const MAX_INFORMATION_LENGTH: u64 = 65535;

/// Maximum length of an ageclass label
pub const MAX_AGECLASS_LENGTH: u64 = 64;
