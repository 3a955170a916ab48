//! Enumerations for the lead pipeline.
//!
//! Wire names match the values clients send and the store persists
//! (`"Cold Call"`, `"Proposal Sent"`, ...), so every enum round-trips
//! through both serde and its `Display`/`FromStr` pair.

use serde::{Deserialize, Serialize};

/// Where a lead came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadSource {
    Website,
    Referral,
    #[serde(rename = "Cold Call")]
    ColdCall,
    Advertisement,
    Email,
    Other,
}

impl LeadSource {
    /// All accepted wire values, used in validation messages.
    pub const ALL: &'static [&'static str] = &[
        "Website",
        "Referral",
        "Cold Call",
        "Advertisement",
        "Email",
        "Other",
    ];

    /// The wire/store representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Website => "Website",
            Self::Referral => "Referral",
            Self::ColdCall => "Cold Call",
            Self::Advertisement => "Advertisement",
            Self::Email => "Email",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for LeadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LeadSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Website" => Ok(Self::Website),
            "Referral" => Ok(Self::Referral),
            "Cold Call" => Ok(Self::ColdCall),
            "Advertisement" => Ok(Self::Advertisement),
            "Email" => Ok(Self::Email),
            "Other" => Ok(Self::Other),
            _ => Err(format!("invalid lead source: {s}")),
        }
    }
}

/// Position of a lead in the sales pipeline.
///
/// `Closed` is special: entering it stamps the lead's `closedAt`, leaving it
/// clears the stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    #[serde(rename = "Proposal Sent")]
    ProposalSent,
    Closed,
}

impl LeadStatus {
    /// All accepted wire values, used in validation messages.
    pub const ALL: &'static [&'static str] =
        &["New", "Contacted", "Qualified", "Proposal Sent", "Closed"];

    /// The wire/store representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Qualified => "Qualified",
            Self::ProposalSent => "Proposal Sent",
            Self::Closed => "Closed",
        }
    }

    /// Whether this status marks the lead as closed (out of the pipeline).
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Self::New),
            "Contacted" => Ok(Self::Contacted),
            "Qualified" => Ok(Self::Qualified),
            "Proposal Sent" => Ok(Self::ProposalSent),
            "Closed" => Ok(Self::Closed),
            _ => Err(format!("invalid lead status: {s}")),
        }
    }
}

/// Optional priority assigned to a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadPriority {
    High,
    Medium,
    Low,
}

impl LeadPriority {
    /// All accepted wire values, used in validation messages.
    pub const ALL: &'static [&'static str] = &["High", "Medium", "Low"];

    /// The wire/store representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl std::fmt::Display for LeadPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LeadPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Self::High),
            "Medium" => Ok(Self::Medium),
            "Low" => Ok(Self::Low),
            _ => Err(format!("invalid lead priority: {s}")),
        }
    }
}
