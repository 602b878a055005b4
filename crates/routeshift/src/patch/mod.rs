pub mod apply_patch;
pub mod build_patch;
pub mod patch_operation;
pub mod patch_path;
