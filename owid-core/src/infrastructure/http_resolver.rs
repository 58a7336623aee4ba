//! HTTP signer resolution against the well-known signer endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::signer::Signer;
use crate::infrastructure::coalescing::CoalescingMap;
use crate::infrastructure::config::HttpResolverConfig;
use crate::port::signer_resolver::{SignerQuery, SignerResolver, SignerResolverError};

/// Resolves signers with `GET {scheme}://{domain}/owid/api/v{version}/signer`.
///
/// Responses deserialize into [`Signer`] with first-class [`Key`] entries,
/// so lazy crypto-key materialization works on the fetched keys. Results
/// are cached for the lifetime of the resolver and concurrent lookups for
/// the same `(version, domain)` collapse to a single request.
///
/// [`Key`]: crate::Key
pub struct HttpSignerResolver {
    client: Client,
    config: HttpResolverConfig,
    cache: CoalescingMap<Arc<Signer>>,
}

impl HttpSignerResolver {
    pub fn new(config: HttpResolverConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .expect("failed to create reqwest client");
        Self {
            client,
            config,
            cache: CoalescingMap::new(),
        }
    }

    fn signer_url(&self, query: &SignerQuery) -> String {
        format!(
            "{}://{}/owid/api/v{}/signer",
            self.config.scheme,
            query.domain(),
            query.version()
        )
    }

    async fn fetch_signer(&self, query: &SignerQuery) -> Result<Arc<Signer>, SignerResolverError> {
        let url = self.signer_url(query);
        tracing::debug!("fetching signer document from {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SignerResolverError::Cancelled
            } else {
                SignerResolverError::FetchFailed {
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                "signer fetch for {} returned HTTP {}",
                query.domain(),
                status.as_u16()
            );
            return Err(SignerResolverError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let signer: Signer =
            response
                .json()
                .await
                .map_err(|e| SignerResolverError::FetchFailed {
                    reason: e.to_string(),
                })?;

        tracing::debug!("resolved signer for {} ({})", signer.domain, signer.name);
        Ok(Arc::new(signer))
    }
}

impl Default for HttpSignerResolver {
    fn default() -> Self {
        Self::new(HttpResolverConfig::default())
    }
}

#[async_trait]
impl SignerResolver for HttpSignerResolver {
    async fn get(&self, query: &SignerQuery) -> Result<Option<Arc<Signer>>, SignerResolverError> {
        let signer = self
            .cache
            .get_or_fetch(&query.cache_key(), || self.fetch_signer(query))
            .await?;
        Ok(Some(signer))
    }
}
