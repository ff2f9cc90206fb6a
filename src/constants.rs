//! Common constants used throughout gog.

/// Placeholder standing in for the generated project's module path.
/// Contains [`NAME_PLACEHOLDER`], so it must always be substituted first.
pub const MODULE_PLACEHOLDER: &str = "github.com/PROJECT_NAME";

/// Placeholder standing in for the bare project name.
pub const NAME_PLACEHOLDER: &str = "PROJECT_NAME";

/// Host every module identity is rooted at.
pub const MODULE_HOST: &str = "github.com";

/// Directory inside the embedded template store that holds the template tree.
pub const TEMPLATE_ROOT: &str = "template";

/// Example environment file shipped with the template
pub const ENV_EXAMPLE_FILE: &str = ".env.example";

/// Live environment file derived from the example
pub const ENV_FILE: &str = ".env";

/// Directory arguments that mean "scaffold into the working directory".
pub const CURRENT_DIR_SENTINELS: [&str; 2] = [".", "./"];
