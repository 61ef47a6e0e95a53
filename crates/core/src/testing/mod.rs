//! Testing utilities and mock implementations for E2E tests.
//!
//! Mock implementations of the invoker, relocator and notifier traits,
//! allowing full orchestrator runs without external codec tools.

mod mock_invoker;
mod mock_notifier;
mod mock_relocator;

pub use mock_invoker::{MockInvoker, RecordedInvocation};
pub use mock_notifier::MockNotifier;
pub use mock_relocator::MockRelocator;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::collector::{SidecarFile, SourceFile};
    use crate::registry::{ArgToken, ToolSpec};
    use std::path::{Path, PathBuf};

    /// Create a source file rooted at its parent directory.
    pub fn source_file(path: impl AsRef<Path>) -> SourceFile {
        let path = path.as_ref().to_path_buf();
        SourceFile {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_lowercase(),
            root: path.parent().unwrap_or(Path::new("/")).to_path_buf(),
            path,
        }
    }

    /// Create a sidecar file rooted at its parent directory.
    pub fn sidecar_file(path: impl AsRef<Path>) -> SidecarFile {
        let path = path.as_ref().to_path_buf();
        SidecarFile {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_lowercase(),
            root: path.parent().unwrap_or(Path::new("/")).to_path_buf(),
            path,
        }
    }

    /// A spec that copies input to output, standing in for a real codec.
    pub fn copy_tool_spec() -> ToolSpec {
        ToolSpec {
            executable: PathBuf::from("cp"),
            template: vec![ArgToken::InputPath, ArgToken::OutputPath],
        }
    }
}
