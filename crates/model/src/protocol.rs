use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Relay protocol a TURN listener accepts client connections on.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ListenerProtocol {
    #[serde(rename = "TURN-UDP")]
    Udp,
    #[serde(rename = "TURN-TCP")]
    Tcp,
    #[serde(rename = "TURN-TLS")]
    Tls,
    #[serde(rename = "TURN-DTLS")]
    Dtls,
}

impl ListenerProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListenerProtocol::Udp => "TURN-UDP",
            ListenerProtocol::Tcp => "TURN-TCP",
            ListenerProtocol::Tls => "TURN-TLS",
            ListenerProtocol::Dtls => "TURN-DTLS",
        }
    }

    /// Whether the listener terminates TLS/DTLS and so needs certificate material.
    pub fn is_secure(&self) -> bool {
        matches!(self, ListenerProtocol::Tls | ListenerProtocol::Dtls)
    }
}

impl Display for ListenerProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProtocol(pub String);

impl Display for UnknownProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown listener protocol: {}", self.0)
    }
}

impl std::error::Error for UnknownProtocol {}

impl FromStr for ListenerProtocol {
    type Err = UnknownProtocol;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UDP" | "TURN-UDP" => Ok(ListenerProtocol::Udp),
            "TCP" | "TURN-TCP" => Ok(ListenerProtocol::Tcp),
            "TLS" | "TURN-TLS" => Ok(ListenerProtocol::Tls),
            "DTLS" | "TURN-DTLS" => Ok(ListenerProtocol::Dtls),
            _ => Err(UnknownProtocol(s.to_string())),
        }
    }
}
