use crate::prelude::*;
use crate::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// Name of the installed command that implements the whole toolset
pub const PRIMARY_COMMAND: &str = "tfnz";

/// Name of the primary executable on the remote host
pub(crate) const PRIMARY_REMOTE_NAME: &str = "tf";

/// Secondary command names, each installed as a symlink to the primary
/// executable. The order is the order the aliases are installed in.
pub const ALIASES: [&str; 7] = [
    "tfvolumes",
    "tfdomains",
    "tfacctbak",
    "tfresources",
    "tfcache",
    "tfdescribe",
    "tflocations",
];

/// Local directories the toolset is installed into
#[derive(Debug, Clone)]
pub struct Layout {
    pub bin_dir: PathBuf,
    pub man_dir: PathBuf,
}

impl Layout {
    pub fn primary_executable(&self) -> PathBuf {
        self.bin_dir.join(PRIMARY_COMMAND)
    }

    pub fn alias_link(&self, alias: &str) -> PathBuf {
        self.bin_dir.join(alias)
    }

    /// Contents of the alias symlinks. It is resolved relative to the link's
    /// own directory, which is the directory of the primary executable.
    pub fn alias_link_target(&self) -> PathBuf {
        PRIMARY_COMMAND.into()
    }

    pub fn man_page(&self, command: &str) -> PathBuf {
        self.man_dir.join(man_page_name(command))
    }

    pub(crate) fn dirs(&self) -> [&Path; 2] {
        [&self.bin_dir, &self.man_dir]
    }
}

/// Host that serves the primary executable and the manual pages
#[derive(Debug, Clone)]
pub struct Remote {
    base_url: url::Url,
}

impl Remote {
    pub fn new(mut base_url: url::Url) -> Self {
        // Without the trailing slash `Url::join` would replace the last
        // path segment instead of appending to it
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { base_url }
    }

    pub fn url(&self, name: &str) -> Result<url::Url> {
        self.base_url
            .join(name)
            .fatal_ctx(|| format!("Invalid resource name {name:?} for {}", self.base_url))
    }

    pub fn man_page_url(&self, command: &str) -> Result<url::Url> {
        self.url(&man_page_name(command))
    }
}

fn man_page_name(command: &str) -> String {
    format!("{command}.1")
}

/// Container image reference in the form of `name:tag`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub name: String,
    pub tag: String,
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}
