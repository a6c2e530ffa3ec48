use std::sync::Arc;

use crate::application::ports::link_repository::LinkRepository;
use crate::application::ports::storage_port::StoragePort;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    link_repo: Arc<dyn LinkRepository>,
    storage_port: Arc<dyn StoragePort>,
}

impl AppServices {
    pub fn new(link_repo: Arc<dyn LinkRepository>, storage_port: Arc<dyn StoragePort>) -> Self {
        Self {
            link_repo,
            storage_port,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn link_repo(&self) -> Arc<dyn LinkRepository> {
        self.services.link_repo.clone()
    }

    pub fn storage_port(&self) -> Arc<dyn StoragePort> {
        self.services.storage_port.clone()
    }
}
