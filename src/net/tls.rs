//! TLS material loading.
//!
//! Key and certificate are read once into memory at startup and never
//! reopened; the listener is built from the buffers.

use std::io;
use std::path::{Path, PathBuf};

use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;

/// Private key filename expected under the certs directory.
pub const KEY_FILE: &str = "localhost-key.pem";
/// Certificate filename expected under the certs directory.
pub const CERT_FILE: &str = "localhost.pem";

/// Errors raised while assembling TLS material. Always fatal at startup.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Key or certificate file could not be read. There is no fallback to
    /// plain HTTP.
    #[error("unreadable TLS material at {path}: {source}")]
    CertMissing { path: PathBuf, source: io::Error },

    /// A file was readable but contained no usable PEM data.
    #[error("no usable PEM data in {path}")]
    InvalidPem { path: PathBuf },
}

/// Read key and certificate from `certs_dir` and build the TLS listener
/// configuration from the in-memory buffers.
pub async fn load_tls_config(certs_dir: &Path) -> Result<RustlsConfig, TransportError> {
    let key_path = certs_dir.join(KEY_FILE);
    let cert_path = certs_dir.join(CERT_FILE);

    let key_pem = read_material(&key_path).await?;
    let cert_pem = read_material(&cert_path).await?;

    let mut cert_reader = cert_pem.as_slice();
    let certs: Vec<Vec<u8>> = rustls_pemfile::certs(&mut cert_reader)
        .map(|cert| cert.map(|der| der.to_vec()))
        .collect::<Result<_, _>>()
        .map_err(|_| TransportError::InvalidPem {
            path: cert_path.clone(),
        })?;
    if certs.is_empty() {
        return Err(TransportError::InvalidPem { path: cert_path });
    }

    let mut key_reader = key_pem.as_slice();
    let key = rustls_pemfile::private_key(&mut key_reader)
        .map_err(|_| TransportError::InvalidPem {
            path: key_path.clone(),
        })?
        .ok_or_else(|| TransportError::InvalidPem {
            path: key_path.clone(),
        })?;

    RustlsConfig::from_der(certs, key.secret_der().to_vec())
        .await
        .map_err(|_| TransportError::InvalidPem { path: cert_path })
}

async fn read_material(path: &Path) -> Result<Vec<u8>, TransportError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| TransportError::CertMissing {
            path: path.to_path_buf(),
            source,
        })
}
