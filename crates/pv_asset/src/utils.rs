use std::path::{Path, PathBuf};

/// File name without its extension
pub fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem()?.to_str()
}

pub fn combine_path(directory: &Path, file_name: &str, extension: &str) -> PathBuf {
    directory.join(format!("{}.{}", file_name, extension))
}

/// Folder containing `path`; relative files resolve against the working directory
pub fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_paths() {
        let path = Path::new("assets/models/teapot.obj");
        assert_eq!(file_stem(path), Some("teapot"));
        assert_eq!(parent_dir(path), Path::new("assets/models"));
        assert_eq!(parent_dir(Path::new("teapot.obj")), Path::new(""));
        assert_eq!(
            combine_path(Path::new("assets"), "teapot", "toml"),
            PathBuf::from("assets/teapot.toml")
        );
    }
}
