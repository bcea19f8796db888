pub mod git;
pub mod org_file;
