//! Registry stubs shared by the integration tests.
#![allow(clippy::expect_used, dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use taxid_core::{
    EuRegistryReply, EuVatRegistry, RegistryClients, RegistryError, UkLookup, UkVatRegistry,
    Validator, ValidatorConfig,
};

/// A VIES stub that answers with a fixed reply or error and counts calls.
pub struct FixedEu {
    reply: Result<EuRegistryReply, fn() -> RegistryError>,
    pub calls: AtomicUsize,
}

impl FixedEu {
    pub fn valid(name: &str, address: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(EuRegistryReply {
                valid: true,
                name: Some(name.to_owned()),
                address: Some(address.to_owned()),
            }),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn invalid() -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(EuRegistryReply::default()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(error: fn() -> RegistryError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EuVatRegistry for FixedEu {
    async fn check_vat(
        &self,
        _country: &str,
        _national: &str,
    ) -> Result<EuRegistryReply, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(make) => Err(make()),
        }
    }
}

/// An HMRC stub with a fixed answer that counts calls.
pub struct FixedUk {
    lookup: UkLookup,
    pub calls: AtomicUsize,
}

impl FixedUk {
    pub fn new(lookup: UkLookup) -> Arc<Self> {
        Arc::new(Self {
            lookup,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UkVatRegistry for FixedUk {
    async fn lookup(&self, _vrn: &str) -> Result<UkLookup, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.lookup.clone())
    }
}

/// A validator wired to both stubs.
pub fn validator(eu: &Arc<FixedEu>, uk: &Arc<FixedUk>) -> Validator {
    Validator::new(
        RegistryClients::none()
            .with_eu(Arc::clone(eu) as Arc<dyn EuVatRegistry>)
            .with_uk(Arc::clone(uk) as Arc<dyn UkVatRegistry>),
        ValidatorConfig::default(),
    )
}
