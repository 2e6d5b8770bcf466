pub mod archive;
pub mod exec;
pub mod package_json;
pub mod path_ext;
pub mod runtime;
