//! # Kubernetes Secret Store
//!
//! Reads secret references and writes exported certificates using
//! Kubernetes `Secret` objects.

use crate::crd::SecretKeyReference;
use crate::provider::{SecretResolver, SecretWriter};
use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::{Api, Patch, PatchParams, PostParams};
use kube::Client;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

/// Merge patch body that sets base64 encoded entries of `Secret.data`
#[derive(Serialize)]
struct SecretDataPatch<'a> {
    data: BTreeMap<&'a str, &'a str>,
}

impl std::fmt::Debug for SecretDataPatch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretDataPatch")
            .field("keys", &self.data.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Overwrite the plaintext entries of a `Secret` built for creation
fn wipe_string_data(secret: &mut Secret) {
    if let Some(string_data) = secret.string_data.as_mut() {
        string_data.values_mut().for_each(Zeroize::zeroize);
    }
}

/// Create a Kubernetes client
///
/// Installs the ring rustls crypto provider first; rustls 0.23+ requires a
/// process-wide provider before any TLS connection is made.
pub async fn client() -> Result<Client> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
    Client::try_default()
        .await
        .context("Failed to create Kubernetes client")
}

/// Secret resolver and writer backed by the Kubernetes API
#[derive(Clone)]
pub struct KubeSecretStore {
    client: Client,
    field_manager: String,
}

impl std::fmt::Debug for KubeSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeSecretStore")
            .field("field_manager", &self.field_manager)
            .finish_non_exhaustive()
    }
}

impl KubeSecretStore {
    pub fn new(client: Client, field_manager: impl Into<String>) -> Self {
        Self {
            client,
            field_manager: field_manager.into(),
        }
    }
}

#[async_trait]
impl SecretResolver for KubeSecretStore {
    async fn resolve_secret_value(
        &self,
        namespace: &str,
        reference: &SecretKeyReference,
    ) -> Result<Zeroizing<String>> {
        let namespace = reference.namespace_or(namespace);
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);

        let secret = secrets
            .get(&reference.name)
            .await
            .with_context(|| format!("Failed to get secret {}/{}", namespace, reference.name))?;

        let value = secret
            .data
            .as_ref()
            .and_then(|data| data.get(&reference.key))
            .map(|bytes| bytes.0.clone())
            .or_else(|| {
                secret
                    .string_data
                    .as_ref()
                    .and_then(|data| data.get(&reference.key))
                    .map(|value| value.clone().into_bytes())
            })
            .with_context(|| {
                format!(
                    "Secret {}/{} has no key {}",
                    namespace, reference.name, reference.key
                )
            })?;

        let value = String::from_utf8(value).with_context(|| {
            format!(
                "Key {} of secret {}/{} is not valid UTF-8",
                reference.key, namespace, reference.name
            )
        })?;
        Ok(Zeroizing::new(value))
    }
}

#[async_trait]
impl SecretWriter for KubeSecretStore {
    async fn write_secret_entry(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);

        let existing = secrets
            .get_opt(name)
            .await
            .with_context(|| format!("Failed to get secret {namespace}/{name}"))?;

        if existing.is_some() {
            // Merge patch only touches `key`, other entries are preserved
            let encoded = Zeroizing::new(STANDARD.encode(value.as_bytes()));
            let patch = SecretDataPatch {
                data: BTreeMap::from([(key, encoded.as_str())]),
            };
            let patch_params = PatchParams {
                field_manager: Some(self.field_manager.clone()),
                ..PatchParams::default()
            };
            secrets
                .patch(name, &patch_params, &Patch::Merge(&patch))
                .await
                .with_context(|| {
                    format!("Failed to update key {key} of secret {namespace}/{name}")
                })?;
            debug!("Updated key {} of secret {}/{}", key, namespace, name);
        } else {
            let mut secret = Secret {
                metadata: ObjectMeta {
                    name: Some(name.to_string()),
                    namespace: Some(namespace.to_string()),
                    ..ObjectMeta::default()
                },
                string_data: Some(BTreeMap::from([(key.to_string(), value.to_string())])),
                ..Secret::default()
            };
            let post_params = PostParams {
                field_manager: Some(self.field_manager.clone()),
                ..PostParams::default()
            };
            let created = secrets.create(&post_params, &secret).await;
            wipe_string_data(&mut secret);
            created.with_context(|| format!("Failed to create secret {namespace}/{name}"))?;
            debug!("Created secret {}/{} with key {}", namespace, name, key);
        }

        Ok(())
    }
}
