//! Runtime filesystem layout under `~/.ballot/`.

use std::path::{Path, PathBuf};

/// `<home>/.ballot/run/` — socket and other session-scoped files.
pub fn run_dir_at(home: &Path) -> PathBuf {
    home.join(".ballot").join("run")
}

/// `<home>/.ballot/run/ballotd.sock`
pub fn socket_path_at(home: &Path) -> PathBuf {
    run_dir_at(home).join("ballotd.sock")
}
