//! Application-wide constants and default values
//!
//! Centralized location for all hard-coded values to improve maintainability

/// Layer instance constants
pub mod layer {
    use crate::layers::LayerId;

    /// Id carried by a layer instance that has not been added to a graph yet
    pub const UNATTACHED_ID: LayerId = usize::MAX;
}

/// Input layer family constants
pub mod input {
    /// Parameter that selects the kind of data an input layer accepts
    pub const DISCRIMINATOR: &str = "input_type";

    /// Enum backing the input discriminator
    pub const ENUM_NAME: &str = "InputType";

    /// Members of the input discriminator enum, in palette order
    pub const MEMBERS: [&str; 5] = ["IMAGE", "TEXT", "TABULAR", "AUDIO", "VIDEO"];

    /// Directory holding the per-variant input glyphs
    pub const ASSET_DIR: &str = "input";
}

/// Configuration file constants
pub mod config {
    /// Directory under the platform config dir
    pub const DIR_NAME: &str = "netweave";

    /// Config file name
    pub const FILE_NAME: &str = "config.json";

    /// Log filter used when neither RUST_LOG nor the config sets one
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}
