use std::fmt;

/// Device lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Online,
    Offline,
    Alert,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Alert => "alert",
        }
    }

    /// Parse a stored status string. Unknown values are treated as offline,
    /// which keeps the access engine fail-closed on bad data.
    pub fn parse(s: &str) -> Self {
        match s {
            "online" => Self::Online,
            "alert" => Self::Alert,
            _ => Self::Offline,
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of a blocked intrusion attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptType {
    BruteForce,
    PortScan,
    Malware,
    UnauthorizedAccess,
    InvalidDevice,
    OfflineDevice,
}

impl AttemptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BruteForce => "brute_force",
            Self::PortScan => "port_scan",
            Self::Malware => "malware",
            Self::UnauthorizedAccess => "unauthorized_access",
            Self::InvalidDevice => "invalid_device",
            Self::OfflineDevice => "offline_device",
        }
    }
}

impl fmt::Display for AttemptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Alert severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Alert workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    Active,
    Investigating,
    Resolved,
    FalsePositive,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Investigating => "investigating",
            Self::Resolved => "resolved",
            Self::FalsePositive => "false_positive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "investigating" => Some(Self::Investigating),
            "resolved" => Some(Self::Resolved),
            "false_positive" => Some(Self::FalsePositive),
            _ => None,
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_status_parse_is_fail_closed() {
        assert_eq!(DeviceStatus::parse("online"), DeviceStatus::Online);
        assert_eq!(DeviceStatus::parse("alert"), DeviceStatus::Alert);
        assert_eq!(DeviceStatus::parse("offline"), DeviceStatus::Offline);
        assert_eq!(DeviceStatus::parse("rebooting"), DeviceStatus::Offline);
    }

    #[test]
    fn severity_round_trips() {
        for s in ["low", "medium", "high", "critical"] {
            assert_eq!(Severity::parse(s).unwrap().as_str(), s);
        }
        assert!(Severity::parse("urgent").is_none());
    }
}
