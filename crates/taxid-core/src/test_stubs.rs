//! Call-counting registry stubs for unit tests.
//!
//! Compiled only in test builds. Integration tests under `tests/` keep their
//! own copies in `tests/common` because they link against the non-test build.
#![allow(clippy::expect_used)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::registry::{
    CompanyRegistry, EuRegistryReply, EuVatRegistry, RegistryError, UkLookup, UkVatRegistry,
};

/// What a stub does when called.
#[derive(Debug, Clone)]
pub enum Behaviour<T> {
    /// Return this value.
    Answer(T),
    /// Fail with a SOAP-style fault.
    Fault,
    /// Fail with a transport error.
    Transport,
    /// Never answer.
    Hang,
}

async fn act<T: Clone>(behaviour: &Behaviour<T>) -> Result<T, RegistryError> {
    match behaviour {
        Behaviour::Answer(v) => Ok(v.clone()),
        Behaviour::Fault => Err(RegistryError::Fault {
            code: "soap:Server".to_owned(),
            message: "MS_UNAVAILABLE".to_owned(),
        }),
        Behaviour::Transport => Err(RegistryError::Transport("connection refused".to_owned())),
        Behaviour::Hang => {
            std::future::pending::<()>().await;
            Err(RegistryError::Protocol("unreachable".to_owned()))
        }
    }
}

// ---------------------------------------------------------------------------
// EU
// ---------------------------------------------------------------------------

/// Stub VIES client recording every call.
#[derive(Debug)]
pub struct StubEu {
    behaviour: Behaviour<EuRegistryReply>,
    calls: AtomicUsize,
    last: Mutex<Option<(String, String)>>,
}

impl StubEu {
    pub fn with(behaviour: Behaviour<EuRegistryReply>) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    /// Replies `valid=true` with the given trader details.
    pub fn valid(name: Option<&str>, address: Option<&str>) -> Self {
        Self::with(Behaviour::Answer(EuRegistryReply {
            valid: true,
            name: name.map(str::to_owned),
            address: address.map(str::to_owned),
        }))
    }

    /// Replies `valid=false`.
    pub fn invalid() -> Self {
        Self::with(Behaviour::Answer(EuRegistryReply::default()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The `(country, national)` pair of the most recent call.
    pub fn last_call(&self) -> Option<(String, String)> {
        self.last.lock().expect("stub mutex").clone()
    }
}

#[async_trait]
impl EuVatRegistry for StubEu {
    async fn check_vat(
        &self,
        country: &str,
        national: &str,
    ) -> Result<EuRegistryReply, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().expect("stub mutex") = Some((country.to_owned(), national.to_owned()));
        act(&self.behaviour).await
    }
}

// ---------------------------------------------------------------------------
// UK (HMRC and Companies House)
// ---------------------------------------------------------------------------

/// Stub UK registry; serves both the VAT lookup and the company register.
#[derive(Debug)]
pub struct StubUk {
    behaviour: Behaviour<UkLookup>,
    calls: AtomicUsize,
    last: Mutex<Option<String>>,
}

impl StubUk {
    pub fn new(lookup: UkLookup) -> Self {
        Self::with(Behaviour::Answer(lookup))
    }

    pub fn with(behaviour: Behaviour<UkLookup>) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn registered(name: &str, address: &str) -> Self {
        Self::new(UkLookup::Registered {
            name: Some(name.to_owned()),
            address: Some(address.to_owned()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<String> {
        self.last.lock().expect("stub mutex").clone()
    }

    async fn answer(&self, number: &str) -> Result<UkLookup, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().expect("stub mutex") = Some(number.to_owned());
        act(&self.behaviour).await
    }
}

#[async_trait]
impl UkVatRegistry for StubUk {
    async fn lookup(&self, vrn: &str) -> Result<UkLookup, RegistryError> {
        self.answer(vrn).await
    }
}

#[async_trait]
impl CompanyRegistry for StubUk {
    async fn company(&self, number: &str) -> Result<UkLookup, RegistryError> {
        self.answer(number).await
    }
}
