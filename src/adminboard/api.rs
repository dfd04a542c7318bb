//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! dashboard operation, whichever UI drives it.
//!
//! The facade:
//! - **Dispatches** to the matching command function
//! - **Applies configuration** (page sizes, submit delay) so callers pass
//!   page numbers, not sizes
//! - **Returns structured types** (`Result<CmdResult<T>>`)
//!
//! It does no I/O of its own beyond what the stores and the config file need,
//! and never formats output.
//!
//! ## Generic Over the Backend
//!
//! `AdminApi<B: SnapshotBackend>`:
//! - Production: `AdminApi<FsBackend>`
//! - Testing: `AdminApi<MemBackend>`
//!
//! Entity operations are generic over the entity type, so the same
//! `create`/`update`/`delete` serve products, events, blogs, users and
//! donations. Which store is touched follows from the form or entity type.

use crate::commands;
use crate::config::AdminConfig;
use crate::error::Result;
use crate::forms::Form;
use crate::model::{Donation, Product, Record, User};
use crate::store::fs_backend::FsBackend;
use crate::store::{Collection, SnapshotBackend, Stores};
use crate::view::{DonationFilter, ListFilter, Paging, UserFilter};
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// The main API facade.
///
/// Owns every store plus the loaded configuration.
pub struct AdminApi<B: SnapshotBackend + Clone> {
    stores: Stores<B>,
    config: AdminConfig,
    data_dir: PathBuf,
}

impl AdminApi<FsBackend> {
    /// Open the stores and config kept under `data_dir`.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let config = AdminConfig::load(&data_dir)?;
        let stores = Stores::open(FsBackend::new(data_dir.clone()))?;
        debug!(data_dir = %data_dir.display(), "opened data directory");
        Ok(Self::new(stores, config, data_dir))
    }
}

impl<B: SnapshotBackend + Clone> AdminApi<B> {
    pub fn new(stores: Stores<B>, config: AdminConfig, data_dir: PathBuf) -> Self {
        Self {
            stores,
            config,
            data_dir,
        }
    }

    pub fn create<F>(&mut self, input: F) -> Result<commands::CmdResult<F::Output>>
    where
        F: Form,
        F::Output: Collection,
    {
        commands::create::run(&mut self.stores, input, self.config.submit_delay())
    }

    pub fn update<F>(
        &mut self,
        id: &Uuid,
        change: impl FnOnce(&mut F),
    ) -> Result<commands::CmdResult<F::Output>>
    where
        F: Form,
        F::Output: Collection,
    {
        commands::update::run::<F, B>(&mut self.stores, id, change, self.config.submit_delay())
    }

    pub fn delete<T: Collection>(&mut self, id: &Uuid) -> Result<commands::CmdResult<T>> {
        commands::delete::run(&mut self.stores, id)
    }

    pub fn view<T: Collection>(&self, id: &Uuid) -> Result<commands::CmdResult<T>> {
        commands::view::run(&self.stores, id)
    }

    pub fn get<T: Collection>(&self, id: &Uuid) -> Option<&Record<T>> {
        self.stores.of::<T>().get(id)
    }

    pub fn list<T, F>(&self, filter: &F, paging: Paging) -> Result<commands::CmdResult<T>>
    where
        T: Collection,
        F: ListFilter<T>,
    {
        commands::list::run(&self.stores, filter, paging)
    }

    /// Users page `page`, sized by `users_page_size`.
    pub fn list_users(
        &self,
        filter: &UserFilter,
        page: usize,
    ) -> Result<commands::CmdResult<User>> {
        self.list(filter, Paging::page(page, self.config.users_page_size))
    }

    /// Donation history page `page`, sized by `donations_page_size`.
    pub fn list_donations(
        &self,
        filter: &DonationFilter,
        page: usize,
    ) -> Result<commands::CmdResult<Donation>> {
        self.list(filter, Paging::page(page, self.config.donations_page_size))
    }

    /// Case-insensitive title search over products.
    pub fn search_products(&self, query: &str) -> Vec<Record<Product>> {
        self.stores.products.search(query)
    }

    pub fn seed(&mut self) -> Result<commands::CmdResult> {
        commands::seed::run(&mut self.stores)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&self.data_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn settings(&self) -> &AdminConfig {
        &self.config
    }

    pub fn stores(&self) -> &Stores<B> {
        &self.stores
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
