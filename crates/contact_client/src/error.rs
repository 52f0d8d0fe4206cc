#![forbid(unsafe_code)]

/// Failure kinds for a remote round trip. Absence of a row is not an error;
/// get/update/delete return `Ok(None)` for unknown ids so callers can branch
/// on "no data" vs "request failed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteErrorKind {
    Transport,
    Timeout,
    Dns,
    Tls,
    Connection,
    HttpStatus,
    GraphQl,
    Decode,
}

impl RemoteErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RemoteErrorKind::Transport => "transport",
            RemoteErrorKind::Timeout => "timeout",
            RemoteErrorKind::Dns => "dns",
            RemoteErrorKind::Tls => "tls",
            RemoteErrorKind::Connection => "connection",
            RemoteErrorKind::HttpStatus => "http_non_200",
            RemoteErrorKind::GraphQl => "graphql_errors",
            RemoteErrorKind::Decode => "decode",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub http_status: Option<u16>,
    pub detail: Option<String>,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind) -> Self {
        Self {
            kind,
            http_status: None,
            detail: None,
        }
    }

    pub fn with_detail(kind: RemoteErrorKind, detail: String) -> Self {
        Self {
            kind,
            http_status: None,
            detail: Some(detail),
        }
    }

    pub fn http_status(status: u16) -> Self {
        Self {
            kind: RemoteErrorKind::HttpStatus,
            http_status: Some(status),
            detail: None,
        }
    }

    pub fn decode(detail: &'static str) -> Self {
        Self::with_detail(RemoteErrorKind::Decode, detail.to_string())
    }

    pub fn from_ureq(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, _) => Self::http_status(status),
            ureq::Error::Transport(transport) => {
                let combined = format!("{:?} {}", transport.kind(), transport);
                Self::new(classify_transport_error_kind(&combined))
            }
        }
    }

    /// One-line log form. Callers decide where it goes; the library never
    /// writes to stderr itself.
    pub fn safe_log_line(&self, op: &'static str) -> String {
        let mut out = format!("contact_client op={} error={}", op, self.kind.as_str());
        if let Some(status) = self.http_status {
            out.push_str(&format!(" status={status}"));
        }
        if let Some(detail) = self.detail.as_deref() {
            out.push_str(&format!(" detail={detail}"));
        }
        out
    }
}

fn classify_transport_error_kind(raw: &str) -> RemoteErrorKind {
    let lower = raw.to_ascii_lowercase();
    if lower.contains("timeout") || lower.contains("timed out") {
        RemoteErrorKind::Timeout
    } else if lower.contains("tls") || lower.contains("ssl") {
        RemoteErrorKind::Tls
    } else if lower.contains("dns") || lower.contains("resolve") {
        RemoteErrorKind::Dns
    } else if lower.contains("connection") || lower.contains("connect") {
        RemoteErrorKind::Connection
    } else {
        RemoteErrorKind::Transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_kind_classification() {
        assert_eq!(
            classify_transport_error_kind("Io read timed out"),
            RemoteErrorKind::Timeout
        );
        assert_eq!(
            classify_transport_error_kind("Dns failed to resolve host"),
            RemoteErrorKind::Dns
        );
        assert_eq!(
            classify_transport_error_kind("TLS handshake failed"),
            RemoteErrorKind::Tls
        );
        assert_eq!(
            classify_transport_error_kind("ConnectionFailed refused"),
            RemoteErrorKind::Connection
        );
        assert_eq!(
            classify_transport_error_kind("proto something odd"),
            RemoteErrorKind::Transport
        );
    }

    #[test]
    fn safe_log_line_includes_status_and_detail() {
        let err = RemoteError {
            kind: RemoteErrorKind::HttpStatus,
            http_status: Some(502),
            detail: Some("bad gateway".to_string()),
        };
        assert_eq!(
            err.safe_log_line("list_contacts"),
            "contact_client op=list_contacts error=http_non_200 status=502 detail=bad gateway"
        );
    }
}
