use super::ImageRef;
use crate::prelude::*;
use crate::{Error, Result};
use std::fmt;
use std::path::PathBuf;

/// A single side effect of the installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    CreateDir { path: PathBuf },
    PullImage { image: ImageRef },
    Download { url: url::Url, dest: PathBuf },
    MakeExecutable { path: PathBuf },
    LinkAlias { alias: &'static str, link: PathBuf, target: PathBuf },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir { path } => write!(f, "create directory {}", path.display()),
            Self::PullImage { image } => write!(f, "pull container image {image}"),
            Self::Download { url, dest } => write!(f, "download {url} to {}", dest.display()),
            Self::MakeExecutable { path } => write!(f, "make {} executable", path.display()),
            Self::LinkAlias { alias, link, target } => write!(
                f,
                "link {alias} command ({} -> {})",
                link.display(),
                target.display()
            ),
        }
    }
}

#[derive(Debug)]
pub struct StepFailure {
    pub step: Step,
    pub error: Error,
}

/// Outcomes of all the steps the installation attempted, in order.
#[derive(Debug, Default)]
pub struct InstallReport {
    steps: Vec<(Step, Option<Error>)>,
}

impl InstallReport {
    pub(crate) fn record(&mut self, step: Step, result: Result) {
        let err = match result {
            Ok(()) => {
                debug!(%step, "Step succeeded");
                None
            }
            Err(err) => {
                warn!(%step, err = tracing_err(&err), "Step failed");
                Some(err)
            }
        };
        self.steps.push((step, err));
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().map(|(step, _)| step)
    }

    pub fn failures(&self) -> impl Iterator<Item = StepFailure> + '_ {
        self.steps.iter().filter_map(|(step, err)| {
            Some(StepFailure {
                step: step.clone(),
                error: err.clone()?,
            })
        })
    }
}

impl fmt::Display for InstallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.steps.len();
        let failed = self.failures().count();

        if failed == 0 {
            return write!(f, "All {total} installation steps succeeded");
        }

        write!(f, "{failed} of {total} installation steps failed:")?;

        for StepFailure { step, error } in self.failures() {
            write!(f, "\n- {step}: {}", error.display_chain())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fatal;
    use expect_test::expect;

    #[test]
    fn summary() {
        let mut report = InstallReport::default();

        report.record(
            Step::CreateDir {
                path: "/usr/local/bin".into(),
            },
            Ok(()),
        );
        report.record(
            Step::PullImage {
                image: ImageRef {
                    name: "tfnz/tfnz".to_owned(),
                    tag: "latest".to_owned(),
                },
            },
            Err(fatal!("docker daemon is not running")),
        );
        report.record(
            Step::LinkAlias {
                alias: "tfcache",
                link: "/usr/local/bin/tfcache".into(),
                target: "/usr/local/bin/tfnz".into(),
            },
            Ok(()),
        );

        assert!(!report.is_success());
        assert_eq!(report.steps().count(), 3);

        expect![[r#"
            1 of 3 installation steps failed:
            - pull container image tfnz/tfnz:latest: FATAL: docker daemon is not running"#]]
        .assert_eq(&report.to_string());
    }

    #[test]
    fn summary_of_success() {
        let mut report = InstallReport::default();

        report.record(
            Step::MakeExecutable {
                path: "/usr/local/bin/tfnz".into(),
            },
            Ok(()),
        );

        assert!(report.is_success());
        expect!["All 1 installation steps succeeded"].assert_eq(&report.to_string());
    }
}
