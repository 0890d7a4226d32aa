//! String-backed identifiers.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps the given string.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the identifier, returning the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of this app installation on the commerce platform.
    AppId
);

string_id!(
    /// Base URL of the commerce-platform API that delivered an event.
    ///
    /// Together with [`AppId`] it scopes every stored record and configuration.
    PlatformApiUrl
);

string_id!(
    /// Sales channel identifier on the commerce platform.
    ChannelId
);

string_id!(
    /// Transaction identifier issued by the payment gateway.
    ///
    /// The platform stores it as the transaction's psp reference.
    GatewayTransactionId
);

string_id!(
    /// Gateway code of the carrier that shipped a fulfillment.
    ShippingCompanyCode
);

impl ShippingCompanyCode {
    /// Parses an optional, possibly blank, metadata value.
    ///
    /// Returns `None` for missing or whitespace-only input.
    pub fn from_metadata(value: Option<&str>) -> Option<Self> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(Self::new)
    }
}
