//! TLS settings for the embedded server.
//!
//! [`ServerSsl`] carries the server's SSL inputs (enabled cipher suites and
//! key store). [`EmbeddedServerFactory`] collects customizers registered
//! during startup wiring and applies them to the `rustls` configuration the
//! server is eventually built with.
//!
//! # Example
//!
//! ```
//! use simlife::tls::{EmbeddedServerFactory, TlsOptions};
//!
//! let mut factory = EmbeddedServerFactory::new();
//! factory.add_builder_customizer(|options: &mut TlsOptions| {
//!     options.user_cipher_suites_order = true;
//! });
//!
//! assert!(factory.tls_options().user_cipher_suites_order);
//! ```

use std::fmt;
use std::sync::Arc;

use rustls::crypto::CryptoProvider;
use rustls::server::ResolvesServerCert;
use rustls::ServerConfig;

use crate::error::WiringError;

/// SSL inputs of the embedded server (`server.ssl.*`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerSsl {
    /// Enabled cipher suites, most preferred first. Both IANA names
    /// (`TLS_AES_128_GCM_SHA256`) and `rustls` names
    /// (`TLS13_AES_128_GCM_SHA256`) are accepted.
    pub ciphers: Vec<String>,

    /// Key store location.
    pub key_store: Option<String>,
}

impl ServerSsl {
    /// Creates empty SSL inputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the enabled cipher suites.
    #[must_use]
    pub fn with_ciphers<I, S>(mut self, ciphers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ciphers = ciphers.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the key store location.
    #[must_use]
    pub fn with_key_store(mut self, key_store: &str) -> Self {
        self.key_store = Some(key_store.to_string());
        self
    }

    /// Returns true when both cipher suites and a key store are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.ciphers.is_empty() && self.key_store.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Builds a crypto provider restricted to [`ciphers`](Self::ciphers), in
    /// the listed order.
    ///
    /// # Errors
    ///
    /// Returns `WiringError::UnknownCipherSuite` for a name the provider
    /// does not support.
    pub fn crypto_provider(&self) -> Result<CryptoProvider, WiringError> {
        let mut provider = rustls::crypto::ring::default_provider();
        let available = std::mem::take(&mut provider.cipher_suites);

        for name in &self.ciphers {
            let suite = available
                .iter()
                .find(|suite| cipher_matches(&format!("{:?}", suite.suite()), name))
                .ok_or_else(|| WiringError::UnknownCipherSuite(name.clone()))?;
            if !provider.cipher_suites.contains(suite) {
                provider.cipher_suites.push(*suite);
            }
        }

        Ok(provider)
    }
}

fn cipher_matches(rustls_name: &str, wanted: &str) -> bool {
    let wanted = wanted.trim();
    rustls_name.eq_ignore_ascii_case(wanted)
        || rustls_name
            .strip_prefix("TLS13_")
            .is_some_and(|rest| wanted.eq_ignore_ascii_case(&format!("TLS_{rest}")))
}

/// TLS options customizers may change before the server is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TlsOptions {
    /// Prefer the server's cipher suite order over the client's.
    pub user_cipher_suites_order: bool,
}

/// A customizer registered on the [`EmbeddedServerFactory`].
pub type BuilderCustomizer = Box<dyn Fn(&mut TlsOptions) + Send + Sync>;

/// Collects server customizers registered during startup.
#[derive(Default)]
pub struct EmbeddedServerFactory {
    customizers: Vec<BuilderCustomizer>,
}

impl fmt::Debug for EmbeddedServerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedServerFactory")
            .field("customizers", &self.customizers.len())
            .finish()
    }
}

impl EmbeddedServerFactory {
    /// Creates a factory without customizers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a customizer. Customizers run in registration order.
    pub fn add_builder_customizer<F>(&mut self, customizer: F)
    where
        F: Fn(&mut TlsOptions) + Send + Sync + 'static,
    {
        self.customizers.push(Box::new(customizer));
    }

    /// Returns the number of registered customizers.
    pub fn customizer_count(&self) -> usize {
        self.customizers.len()
    }

    /// Returns the options produced by running every customizer over the
    /// defaults.
    #[must_use]
    pub fn tls_options(&self) -> TlsOptions {
        let mut options = TlsOptions::default();
        for customizer in &self.customizers {
            customizer(&mut options);
        }
        options
    }

    /// Applies the customized options to an existing configuration.
    ///
    /// Options left at their defaults do not touch `config`.
    pub fn apply(&self, config: &mut ServerConfig) {
        if self.tls_options().user_cipher_suites_order {
            config.ignore_client_order = true;
        }
    }

    /// Builds a server configuration from the SSL inputs and applies the
    /// customized options.
    ///
    /// # Errors
    ///
    /// Returns `WiringError::UnknownCipherSuite` for an unsupported cipher
    /// name and `WiringError::Tls` if `rustls` rejects the configuration.
    pub fn server_config(
        &self,
        ssl: &ServerSsl,
        certificates: Arc<dyn ResolvesServerCert>,
    ) -> Result<ServerConfig, WiringError> {
        let mut config = ServerConfig::builder_with_provider(Arc::new(ssl.crypto_provider()?))
            .with_safe_default_protocol_versions()?
            .with_no_client_auth()
            .with_cert_resolver(certificates);
        self.apply(&mut config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustls::server::ClientHello;
    use rustls::sign::CertifiedKey;

    #[derive(Debug)]
    struct NoCertificate;

    impl ResolvesServerCert for NoCertificate {
        fn resolve(&self, _client_hello: ClientHello<'_>) -> Option<Arc<CertifiedKey>> {
            None
        }
    }

    fn ssl() -> ServerSsl {
        ServerSsl::new()
            .with_ciphers(["TLS_AES_256_GCM_SHA384", "TLS13_AES_128_GCM_SHA256"])
            .with_key_store("classpath:config/tls/keystore.p12")
    }

    #[test]
    fn test_server_ssl_is_configured() {
        assert!(ssl().is_configured());
        assert!(!ServerSsl::new().with_key_store("keystore.p12").is_configured());
        assert!(!ServerSsl::new().with_ciphers(["TLS_AES_256_GCM_SHA384"]).is_configured());
        assert!(!ServerSsl::new()
            .with_ciphers(["TLS_AES_256_GCM_SHA384"])
            .with_key_store(" ")
            .is_configured());
    }

    #[test]
    fn test_crypto_provider_keeps_listed_order() {
        let provider = ssl().crypto_provider().unwrap();
        let names: Vec<String> = provider
            .cipher_suites
            .iter()
            .map(|s| format!("{:?}", s.suite()))
            .collect();
        assert_eq!(names, vec!["TLS13_AES_256_GCM_SHA384", "TLS13_AES_128_GCM_SHA256"]);
    }

    #[test]
    fn test_crypto_provider_unknown_cipher() {
        let ssl = ServerSsl::new().with_ciphers(["TLS_RSA_WITH_RC4_128_MD5"]);
        assert!(matches!(
            ssl.crypto_provider(),
            Err(WiringError::UnknownCipherSuite(ref name)) if name == "TLS_RSA_WITH_RC4_128_MD5"
        ));
    }

    #[test]
    fn test_factory_without_customizers() {
        let factory = EmbeddedServerFactory::new();
        assert_eq!(factory.customizer_count(), 0);
        assert_eq!(factory.tls_options(), TlsOptions::default());

        let config = factory.server_config(&ssl(), Arc::new(NoCertificate)).unwrap();
        assert!(!config.ignore_client_order);
    }

    #[test]
    fn test_factory_server_cipher_order() {
        let mut factory = EmbeddedServerFactory::new();
        factory.add_builder_customizer(|options| options.user_cipher_suites_order = true);

        let config = factory.server_config(&ssl(), Arc::new(NoCertificate)).unwrap();
        assert!(config.ignore_client_order);
    }

    #[test]
    fn test_customizers_run_in_order() {
        let mut factory = EmbeddedServerFactory::new();
        factory.add_builder_customizer(|options| options.user_cipher_suites_order = true);
        factory.add_builder_customizer(|options| options.user_cipher_suites_order = false);
        assert!(!factory.tls_options().user_cipher_suites_order);
    }
}
