mod cli;
mod config;
mod error;
mod http;
mod install;
mod observability;
mod util;

pub use crate::error::*;
pub use cli::*;
pub use config::*;
pub use install::*;
pub use observability::*;

pub(crate) use crate::error::{err, err_ctx, fatal};

mod prelude {
    pub(crate) use crate::error::prelude::*;
    pub(crate) use crate::observability::logging::prelude::*;
    pub(crate) use crate::util::prelude::*;
}

/// Run the whole installation sequence. Configuration problems are returned
/// as an error, the failures of the installation steps are in the report.
pub async fn run(config: Config) -> Result<InstallReport> {
    let layout = Layout {
        bin_dir: config.bin_dir.clone(),
        man_dir: config.man_dir.clone(),
    };

    let remote = Remote::new(config.base_url.clone());

    let image = ImageRef {
        name: config.image.clone(),
        tag: config.image_tag.clone(),
    };

    let plan = Plan::new(&layout, &remote, image)?;

    let fetcher = HttpFetcher::new(http::create_client(config.http_timeout())?);
    let runtime = ContainerCli::new(config.container_cli);

    Ok(Installer::new(plan, fetcher, runtime).run().await)
}
