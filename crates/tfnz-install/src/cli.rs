use crate::Config;
use clap::Parser;
use std::path::PathBuf;

/// Install the tfnz command line toolset: the `tfnz` executable, its alias
/// commands and their manual pages, and the `tfnz/tfnz` container image.
///
/// Defaults can also be changed with `TFNZ_INSTALL_*` environment variables.
#[derive(Parser, Debug)]
#[clap(version)]
pub struct Args {
    /// Directory for the executable and the alias symlinks
    /// [default: /usr/local/bin]
    #[clap(long)]
    bin_dir: Option<PathBuf>,

    /// Directory for the manual pages [default: /usr/local/share/man/man1]
    #[clap(long)]
    man_dir: Option<PathBuf>,
}

impl Args {
    /// Command line arguments take precedence over the environment
    pub fn apply(self, config: &mut Config) {
        if let Some(bin_dir) = self.bin_dir {
            config.bin_dir = bin_dir;
        }
        if let Some(man_dir) = self.man_dir {
            config.man_dir = man_dir;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn no_arguments_keep_the_config() {
        let mut config = Config::from_vars(std::iter::empty()).unwrap();
        let before = config.bin_dir.clone();

        Args::try_parse_from(["tfnz-install"]).unwrap().apply(&mut config);

        assert_eq!(config.bin_dir, before);
    }

    #[test]
    fn arguments_override_the_config() {
        let mut config = Config::from_vars(std::iter::empty()).unwrap();

        Args::try_parse_from(["tfnz-install", "--bin-dir", "/opt/bin", "--man-dir", "/opt/man"])
            .unwrap()
            .apply(&mut config);

        assert_eq!(config.bin_dir, PathBuf::from("/opt/bin"));
        assert_eq!(config.man_dir, PathBuf::from("/opt/man"));
    }
}
