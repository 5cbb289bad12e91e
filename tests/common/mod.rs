//! Common test utilities for the certificate hook tests
//!
//! In-memory fakes of the collaborator traits. Every fake records the calls
//! it receives so tests can assert on ordering and counts.

#![allow(
    dead_code,
    reason = "Each test binary uses a different subset of the helpers"
)]

use acm_certificate_controller::prelude::*;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use zeroize::Zeroizing;

pub const PASSPHRASE: &str = "hunter2";
pub const CERTIFICATE_ARN: &str =
    "arn:aws:acm:us-east-1:123456789012:certificate/0b7e3c8a-1f2d-4e5f-9a6b-7c8d9e0f1a2b";

pub const P256_ENCRYPTED: &str = include_str!("../fixtures/p256.encrypted.pem");
pub const P256_PLAIN: &str = include_str!("../fixtures/p256.pem");
pub const P384_ENCRYPTED: &str = include_str!("../fixtures/p384.encrypted.pem");
pub const P384_PLAIN: &str = include_str!("../fixtures/p384.pem");
pub const RSA2048_ENCRYPTED: &str = include_str!("../fixtures/rsa2048.encrypted.pem");
pub const RSA2048_PLAIN: &str = include_str!("../fixtures/rsa2048.pem");
pub const P256_SHA1_ENCRYPTED: &str = include_str!("../fixtures/p256.sha1.encrypted.pem");

/// Fake ACM
#[derive(Debug, Default)]
pub struct FakeCertificateService {
    state: Mutex<ServiceState>,
}

#[derive(Debug, Default)]
struct ServiceState {
    calls: Vec<String>,
    imported: Vec<ImportedMaterial>,
    export_response: Option<ExportResponse>,
    exported_passphrases: Vec<Vec<u8>>,
    remote_tags: TagSet,
    added: Vec<TagSet>,
    removed: Vec<TagSet>,
    failing: Vec<&'static str>,
    hanging: Vec<&'static str>,
}

/// What the fake received in an ImportCertificate call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedMaterial {
    pub certificate: Vec<u8>,
    pub certificate_chain: Option<Vec<u8>>,
    pub private_key: Vec<u8>,
    pub tags: TagSet,
}

impl FakeCertificateService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_export(response: ExportResponse) -> Self {
        let service = Self::default();
        service.state.lock().unwrap().export_response = Some(response);
        service
    }

    pub fn with_remote_tags(tags: TagSet) -> Self {
        let service = Self::default();
        service.state.lock().unwrap().remote_tags = tags;
        service
    }

    /// Make every call of `op_name` fail
    pub fn fail(&self, op_name: &'static str) {
        self.state.lock().unwrap().failing.push(op_name);
    }

    /// Make every call of `op_name` block until cancelled
    pub fn hang(&self, op_name: &'static str) {
        self.state.lock().unwrap().hanging.push(op_name);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn imported(&self) -> Vec<ImportedMaterial> {
        self.state.lock().unwrap().imported.clone()
    }

    pub fn exported_passphrases(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().exported_passphrases.clone()
    }

    pub fn remote_tags(&self) -> TagSet {
        self.state.lock().unwrap().remote_tags.clone()
    }

    pub fn added(&self) -> Vec<TagSet> {
        self.state.lock().unwrap().added.clone()
    }

    pub fn removed(&self) -> Vec<TagSet> {
        self.state.lock().unwrap().removed.clone()
    }

    /// Record the call and decide whether it fails or hangs
    async fn enter(&self, op_name: &'static str) -> Result<()> {
        let (fails, hangs) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(op_name.to_string());
            (
                state.failing.contains(&op_name),
                state.hanging.contains(&op_name),
            )
        };
        if hangs {
            std::future::pending::<()>().await;
        }
        if fails {
            return Err(anyhow!("{op_name}: service unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl CertificateService for FakeCertificateService {
    async fn import_certificate(&self, request: ImportRequest) -> Result<ImportResponse> {
        self.enter("ImportCertificate").await?;
        let mut state = self.state.lock().unwrap();
        state.imported.push(ImportedMaterial {
            certificate: request.certificate,
            certificate_chain: request.certificate_chain,
            private_key: request.private_key.to_vec(),
            tags: request.tags.clone(),
        });
        state.remote_tags = request.tags;
        Ok(ImportResponse {
            certificate_arn: CERTIFICATE_ARN.to_string(),
        })
    }

    async fn export_certificate(
        &self,
        _certificate_arn: &str,
        passphrase: &[u8],
    ) -> Result<ExportResponse> {
        self.enter("ExportCertificate").await?;
        let mut state = self.state.lock().unwrap();
        state.exported_passphrases.push(passphrase.to_vec());
        state
            .export_response
            .clone()
            .ok_or_else(|| anyhow!("no export response configured"))
    }

    async fn add_tags(&self, _certificate_arn: &str, tags: &TagSet) -> Result<()> {
        self.enter("AddTagsToCertificate").await?;
        let mut state = self.state.lock().unwrap();
        for (key, value) in tags {
            state.remote_tags.insert(key, value);
        }
        state.added.push(tags.clone());
        Ok(())
    }

    async fn remove_tags(&self, _certificate_arn: &str, tags: &TagSet) -> Result<()> {
        self.enter("RemoveTagsFromCertificate").await?;
        let mut state = self.state.lock().unwrap();
        for key in tags.keys() {
            state.remote_tags.remove(key);
        }
        state.removed.push(tags.clone());
        Ok(())
    }

    async fn list_tags(&self, _certificate_arn: &str) -> Result<TagSet> {
        self.enter("ListTagsForCertificate").await?;
        Ok(self.state.lock().unwrap().remote_tags.clone())
    }
}

/// Fake Kubernetes Secrets, shared by the resolver and writer side
#[derive(Debug, Default)]
pub struct FakeSecretStore {
    secrets: Mutex<BTreeMap<(String, String), BTreeMap<String, String>>>,
    writes: Mutex<Vec<(String, String, String)>>,
    failing_keys: Mutex<Vec<String>>,
}

impl FakeSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, namespace: &str, name: &str, key: &str, value: &str) -> Self {
        self.secrets
            .lock()
            .unwrap()
            .entry((namespace.to_string(), name.to_string()))
            .or_default()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Make writes of `key` fail
    pub fn fail_writes_to(&self, key: &str) {
        self.failing_keys.lock().unwrap().push(key.to_string());
    }

    pub fn secret(&self, namespace: &str, name: &str) -> Option<BTreeMap<String, String>> {
        self.secrets
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    /// `(namespace, name, key)` of every write, in order
    pub fn writes(&self) -> Vec<(String, String, String)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl SecretResolver for FakeSecretStore {
    async fn resolve_secret_value(
        &self,
        namespace: &str,
        reference: &SecretKeyReference,
    ) -> Result<Zeroizing<String>> {
        let namespace = reference.namespace_or(namespace);
        self.secrets
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), reference.name.clone()))
            .and_then(|data| data.get(&reference.key))
            .map(|value| Zeroizing::new(value.clone()))
            .ok_or_else(|| anyhow!("secret {namespace}/{} not found", reference.name))
    }
}

#[async_trait]
impl SecretWriter for FakeSecretStore {
    async fn write_secret_entry(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
        value: &str,
    ) -> Result<()> {
        if self.failing_keys.lock().unwrap().iter().any(|k| k == key) {
            return Err(anyhow!("write of {key} rejected"));
        }
        self.writes
            .lock()
            .unwrap()
            .push((namespace.to_string(), name.to_string(), key.to_string()));
        self.secrets
            .lock()
            .unwrap()
            .entry((namespace.to_string(), name.to_string()))
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Recorder keeping every `(op_type, op_name, failed)` it is given
#[derive(Debug, Default)]
pub struct RecordingRecorder {
    calls: Mutex<Vec<(String, String, bool)>>,
}

impl RecordingRecorder {
    pub fn calls(&self) -> Vec<(String, String, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ApiCallRecorder for RecordingRecorder {
    fn record_api_call(&self, op_type: &str, op_name: &str, error: Option<&anyhow::Error>) {
        self.calls
            .lock()
            .unwrap()
            .push((op_type.to_string(), op_name.to_string(), error.is_some()));
    }
}

/// Hooks wired to the fakes, with no post-create delay
pub fn hooks(
    service: &Arc<FakeCertificateService>,
    store: &Arc<FakeSecretStore>,
    recorder: &Arc<RecordingRecorder>,
) -> CertificateHooks {
    let config = ControllerConfig {
        post_create_delay_secs: 0,
        ..ControllerConfig::default()
    };
    CertificateHooks::new(
        Arc::clone(service) as Arc<dyn CertificateService>,
        Arc::clone(store) as Arc<dyn SecretResolver>,
        Arc::clone(store) as Arc<dyn SecretWriter>,
        Arc::clone(recorder) as Arc<dyn ApiCallRecorder>,
        config,
    )
}

pub fn secret_ref(name: &str, key: &str) -> SecretKeyReference {
    SecretKeyReference {
        name: name.to_string(),
        namespace: None,
        key: key.to_string(),
    }
}

/// Certificate `team-a/my-cert`
pub fn certificate(spec: CertificateSpec) -> Certificate {
    let mut certificate = Certificate::new("my-cert", spec);
    certificate.metadata.namespace = Some("team-a".to_string());
    certificate
}

/// Certificate that has been created in ACM
pub fn created_certificate(spec: CertificateSpec) -> Certificate {
    let mut certificate = certificate(spec);
    certificate.status = Some(CertificateStatus {
        certificate_arn: Some(CERTIFICATE_ARN.to_string()),
        status: Some(CertificateStatusKind::Issued),
        ..CertificateStatus::default()
    });
    certificate
}

pub fn tag_set(pairs: &[(&str, &str)]) -> TagSet {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Public key of a PKCS#8 PEM P-256 private key
pub fn public_key_of_p256(pem: &str) -> p256::PublicKey {
    use p256::pkcs8::DecodePrivateKey;
    p256::SecretKey::from_pkcs8_pem(pem).unwrap().public_key()
}
