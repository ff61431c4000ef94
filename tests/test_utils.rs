pub struct TmpFile(std::path::PathBuf);

impl TmpFile {
    pub fn create(base: &str, extension: &str) -> TmpFile {
        let filename = std::env::temp_dir().join(format!(
            "moments-cam-{}-{}-{:?}.{}",
            base,
            std::process::id(),
            std::thread::current().id(),
            extension,
        ));
        TmpFile(filename)
    }
}

impl std::convert::AsRef<std::path::Path> for TmpFile {
    fn as_ref(&self) -> &std::path::Path {
        self.0.as_path()
    }
}

impl Drop for TmpFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}
