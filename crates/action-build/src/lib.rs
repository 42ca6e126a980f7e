//! `action-build` — finds every action in the repository and bundles each
//! one into a standalone binary under its `dist/` directory.
//!
//! ```text
//! actions.yaml (optional)
//!     │
//!     ▼
//! discover()      ← actions/<name>/src/<name>.rs
//!     │
//!     ▼
//! build_all()     ← one blocking CargoBundler task per action
//!     │
//!     ▼
//! BuildReport     ← actions/<name>/dist/<name>, or the failures
//! ```

pub mod bundle;
pub mod config;
pub mod discover;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod paths;
pub mod root;

pub use bundle::{Bundler, CargoBundler};
pub use config::{BuildSettings, Config};
pub use discover::{discover, ActionSource};
pub use error::{BuildError, Result};
pub use manifest::ActionManifest;
pub use orchestrator::{build_all, BuildFailure, BuildReport, BuiltArtifact};
