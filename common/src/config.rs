use std::path::PathBuf;

pub struct Config {
    /// Storage document holding the catalog, users and progress.
    pub data_path: PathBuf,
    /// Directory the cover images are read from.
    pub images_dir: PathBuf,
    /// Email of the already-authenticated caller.
    pub user: String,
    /// 0 prints everything, 1 drops headers, 2 prints only values.
    pub quiet: u8,
    /// Print redirects instead of following them.
    pub no_follow: bool,
}
