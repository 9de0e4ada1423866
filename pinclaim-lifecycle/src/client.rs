//! Client wiring: configuration → HTTP collaborators → workflows.

use std::sync::Arc;

use pinclaim_core::error::Result;
use pinclaim_core::traits::{ClaimGenerator, PinningService, StorageUploader, WalletProvider};
use pinclaim_core::PinClaimConfig;
use pinclaim_ipfs::IpfsUploadClient;
use pinclaim_service::HttpPinningService;
use pinclaim_wallet::{ConsumerWalletProvider, SignerClaimGenerator};

use crate::orchestrator::PinClaimOrchestrator;
use crate::renewal::RenewalCoordinator;
use crate::reprocess::ReprocessingCoordinator;
use crate::resolver::PinStatusResolver;

/// Entry point holding the configured collaborators shared by every workflow.
#[derive(Clone)]
pub struct PinClaimClient {
    config: PinClaimConfig,
    uploader: Arc<dyn StorageUploader>,
    service: Arc<dyn PinningService>,
    wallets: Arc<dyn WalletProvider>,
    generator: Arc<dyn ClaimGenerator>,
}

impl PinClaimClient {
    /// Validates `config` and connects the HTTP implementations of every collaborator.
    pub fn from_config(config: PinClaimConfig) -> Result<Self> {
        config.validate()?;

        let uploader = Arc::new(IpfsUploadClient::with_config(&config)?);
        let service = Arc::new(HttpPinningService::with_config(&config)?);
        let wallets = Arc::new(ConsumerWalletProvider::with_config(&config)?);
        let generator = Arc::new(SignerClaimGenerator::with_config(&config)?);

        Ok(Self::from_parts(config, uploader, service, wallets, generator))
    }

    /// Builds a client from explicit collaborators.
    pub fn from_parts(
        config: PinClaimConfig,
        uploader: Arc<dyn StorageUploader>,
        service: Arc<dyn PinningService>,
        wallets: Arc<dyn WalletProvider>,
        generator: Arc<dyn ClaimGenerator>,
    ) -> Self {
        Self {
            config,
            uploader,
            service,
            wallets,
            generator,
        }
    }

    /// Configuration the client was built from.
    pub fn config(&self) -> &PinClaimConfig {
        &self.config
    }

    /// Pin Status Resolver.
    pub fn resolver(&self) -> PinStatusResolver {
        PinStatusResolver::new(self.service.clone())
    }

    /// Pin Claim Orchestrator reading files from the configured files directory.
    pub fn orchestrator(&self) -> PinClaimOrchestrator {
        PinClaimOrchestrator::new(
            self.uploader.clone(),
            self.wallets.clone(),
            self.generator.clone(),
            self.service.clone(),
            &self.config.files_dir,
        )
    }

    /// Renewal Coordinator.
    pub fn renewal(&self) -> RenewalCoordinator {
        RenewalCoordinator::new(self.resolver(), self.wallets.clone(), self.generator.clone())
    }

    /// Reprocessing Coordinator.
    pub fn reprocessing(&self) -> ReprocessingCoordinator {
        ReprocessingCoordinator::new(self.service.clone())
    }
}
