//! core::naming
//!
//! Repository variable naming.
//!
//! Each tracked project owns one repository variable. Its name is derived
//! from the project name: lower case in the URL path, upper case in the
//! update payload (GitHub stores variable names upper-cased).

/// Suffix appended to a project name to form its variable name.
pub const VARIABLE_SUFFIX: &str = "_version";

/// Derive the variable name for a project.
///
/// # Example
///
/// ```
/// use versync::core::naming::generate_variable_name;
///
/// assert_eq!(generate_variable_name("Falco"), "falco_version");
/// ```
pub fn generate_variable_name(project: &str) -> String {
    format!("{}{}", project, VARIABLE_SUFFIX).to_lowercase()
}

/// The variable name as sent in an update payload.
///
/// # Example
///
/// ```
/// use versync::core::naming::payload_variable_name;
///
/// assert_eq!(payload_variable_name("falco"), "FALCO_VERSION");
/// ```
pub fn payload_variable_name(project: &str) -> String {
    generate_variable_name(project).to_uppercase()
}
