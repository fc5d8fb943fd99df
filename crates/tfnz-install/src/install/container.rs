use super::ImageRef;
use crate::util::process;
use crate::Result;
use async_trait::async_trait;

/// External container management tool
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Pulls the image from the runtime's default registry. Only the success
    /// of the operation matters, the pulled image isn't inspected.
    async fn pull(&self, image: &ImageRef) -> Result;
}

/// Container runtime driven through its CLI (`docker`, `podman`, etc.)
pub struct ContainerCli {
    program: String,
}

impl ContainerCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ContainerRuntime for ContainerCli {
    async fn pull(&self, image: &ImageRef) -> Result {
        process::run(&self.program, &["pull", &image.to_string()]).await?;
        Ok(())
    }
}
