use std::path::PathBuf;

/// The (old, new) literal text pair defining a substitution. `old` must
/// occur verbatim in the target; every occurrence is replaced by `new`.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchDescriptor {
    pub old: String,
    pub new: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub file_path: PathBuf,
    pub descriptor: PatchDescriptor,
}
