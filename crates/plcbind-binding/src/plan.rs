//! Build plan: the side effects a binding run asks the build system to perform.
//!
//! Nothing here touches the filesystem. The plan lists the directories to
//! copy into the firmware source tree, the include flags to add, and one
//! registration per resolved binding.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::registration::Registration;
use crate::resolve::BindingRecord;

/// Side effects delegated to the firmware build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    /// Directories whose contents are copied into the firmware `src/` tree.
    pub copy_dirs: Vec<PathBuf>,
    /// Extra compiler flags.
    pub build_flags: Vec<String>,
    /// Component registrations, in resolution order.
    pub registrations: Vec<Registration>,
}

impl BuildPlan {
    /// Plan a build from the runtime include directory, the generated-code
    /// directory (both relative to the project), and resolved records.
    pub fn new(includes_dir: &Path, generated_dir: &Path, records: &[BindingRecord]) -> Self {
        let copy_dirs = vec![includes_dir.to_path_buf(), generated_dir.to_path_buf()];
        let build_flags = copy_dirs.iter().map(|dir| include_flag(dir)).collect();
        Self {
            copy_dirs,
            build_flags,
            registrations: records.iter().map(Registration::from).collect(),
        }
    }
}

/// The include flag for a directory copied under `src/`.
pub fn include_flag(dir: &Path) -> String {
    format!("-I src/{}", dir.display())
}
