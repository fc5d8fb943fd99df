//! The installation sequence itself.
//!
//! Every step is attempted even if the previous ones failed. The outcome of
//! each step is recorded in the [`InstallReport`], which is the only way the
//! failures are surfaced.

mod container;
mod fetch;
mod layout;
mod report;

pub use container::*;
pub use fetch::*;
pub use layout::*;
pub use report::*;

use crate::error::InstallError;
use crate::prelude::*;
use crate::util::fs;
use crate::{err, Result};
use std::path::{Path, PathBuf};

/// Remote resource and the local file it is downloaded to
#[derive(Debug, Clone)]
struct Download {
    url: url::Url,
    dest: PathBuf,
}

#[derive(Debug, Clone)]
struct AliasPlan {
    alias: &'static str,
    link: PathBuf,
    man_page: Download,
}

/// All the paths and URLs the installation touches, resolved upfront.
#[derive(Debug, Clone)]
pub struct Plan {
    dirs: Vec<PathBuf>,
    image: ImageRef,
    executable: Download,
    man_page: Download,
    alias_target: PathBuf,
    aliases: Vec<AliasPlan>,
}

impl Plan {
    pub fn new(layout: &Layout, remote: &Remote, image: ImageRef) -> Result<Self> {
        let man_page = |command: &str| -> Result<_> {
            Ok(Download {
                url: remote.man_page_url(command)?,
                dest: layout.man_page(command),
            })
        };

        let aliases = ALIASES
            .into_iter()
            .map(|alias| -> Result<_> {
                Ok(AliasPlan {
                    alias,
                    link: layout.alias_link(alias),
                    man_page: man_page(alias)?,
                })
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            dirs: Vec::from(layout.dirs().map(Path::to_path_buf)),
            image,
            executable: Download {
                url: remote.url(PRIMARY_REMOTE_NAME)?,
                dest: layout.primary_executable(),
            },
            man_page: man_page(PRIMARY_COMMAND)?,
            alias_target: layout.alias_link_target(),
            aliases,
        })
    }
}

pub struct Installer<F, C> {
    plan: Plan,
    fetcher: F,
    runtime: C,
}

impl<F: Fetch, C: ContainerRuntime> Installer<F, C> {
    pub fn new(plan: Plan, fetcher: F, runtime: C) -> Self {
        Self {
            plan,
            fetcher,
            runtime,
        }
    }

    #[instrument(skip_all)]
    pub async fn run(&self) -> InstallReport {
        let plan = &self.plan;
        let mut report = InstallReport::default();

        for dir in &plan.dirs {
            let step = Step::CreateDir { path: dir.clone() };
            report.record(step, fs::create_dir_all(dir).await.map_err(Into::into));
        }

        let result = self
            .runtime
            .pull(&plan.image)
            .with_duration_log("Pulled container image")
            .await;

        report.record(
            Step::PullImage {
                image: plan.image.clone(),
            },
            result,
        );

        let executable = &plan.executable.dest;

        self.download(&mut report, &plan.executable).await;

        let result = fs::add_execute_permissions(executable).await.map(drop);
        let step = Step::MakeExecutable {
            path: executable.clone(),
        };
        report.record(step, result);

        self.download(&mut report, &plan.man_page).await;

        for alias in &plan.aliases {
            let step = Step::LinkAlias {
                alias: alias.alias,
                link: alias.link.clone(),
                target: plan.alias_target.clone(),
            };
            let result = link_alias(executable, &plan.alias_target, &alias.link).await;
            report.record(step, result);

            self.download(&mut report, &alias.man_page).await;
        }

        report
    }

    async fn download(&self, report: &mut InstallReport, download: &Download) {
        let Download { url, dest } = download;

        let result = self
            .fetcher
            .fetch_to_file(url, dest)
            .with_duration_log(&format!("Downloaded {url}"))
            .await;

        let step = Step::Download {
            url: url.clone(),
            dest: dest.clone(),
        };
        report.record(step, result);
    }
}

/// Never leaves a dangling alias behind. If the primary executable is missing
/// the alias is not touched at all. The `target` is written into the link
/// as is, so it must be relative to the link's directory.
async fn link_alias(executable: &Path, target: &Path, link: &Path) -> Result {
    if !fs::exists(executable).await? {
        return Err(err!(InstallError::MissingLinkTarget {
            link,
            target: executable
        }));
    }
    fs::force_symlink(target, link).await
}
