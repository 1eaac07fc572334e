use crate::{AuthenticationMechanism, AuthenticationType, SymmetricKey, X509Thumbprint};

/// Both SAS keys; the registry rejects a half-specified pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SasKeys {
    pub primary_key: String,
    pub secondary_key: String,
}

/// Authentication that can be replayed against a destination registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDescriptor {
    Sas(SasKeys),
    SelfSigned(X509Thumbprint),
    CertificateAuthority(X509Thumbprint),
}

impl AuthDescriptor {
    /// Interpret a wire authentication block.
    ///
    /// Returns `None` for an unknown or `none` type and for a `sas` block
    /// missing either key; the caller then leaves authentication to the
    /// backend default.
    pub fn from_mechanism(mechanism: &AuthenticationMechanism) -> Option<Self> {
        match mechanism.auth_type? {
            AuthenticationType::Sas => {
                let keys = mechanism.symmetric_key.as_ref()?;
                let primary_key = non_empty(keys.primary_key.as_deref())?;
                let secondary_key = non_empty(keys.secondary_key.as_deref())?;
                Some(Self::Sas(SasKeys {
                    primary_key: primary_key.to_string(),
                    secondary_key: secondary_key.to_string(),
                }))
            }
            AuthenticationType::SelfSigned => Some(Self::SelfSigned(
                mechanism.x509_thumbprint.clone().unwrap_or_default(),
            )),
            AuthenticationType::CertificateAuthority => Some(Self::CertificateAuthority(
                mechanism.x509_thumbprint.clone().unwrap_or_default(),
            )),
            AuthenticationType::None => None,
        }
    }

    pub fn auth_type(&self) -> AuthenticationType {
        match self {
            Self::Sas(_) => AuthenticationType::Sas,
            Self::SelfSigned(_) => AuthenticationType::SelfSigned,
            Self::CertificateAuthority(_) => AuthenticationType::CertificateAuthority,
        }
    }

    pub fn is_sas(&self) -> bool {
        matches!(self, Self::Sas(_))
    }

    pub fn to_mechanism(&self) -> AuthenticationMechanism {
        match self {
            Self::Sas(keys) => AuthenticationMechanism {
                auth_type: Some(AuthenticationType::Sas),
                symmetric_key: Some(SymmetricKey {
                    primary_key: Some(keys.primary_key.clone()),
                    secondary_key: Some(keys.secondary_key.clone()),
                }),
                x509_thumbprint: None,
            },
            Self::SelfSigned(thumbprint) | Self::CertificateAuthority(thumbprint) => {
                AuthenticationMechanism {
                    auth_type: Some(self.auth_type()),
                    symmetric_key: None,
                    x509_thumbprint: Some(thumbprint.clone()),
                }
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
