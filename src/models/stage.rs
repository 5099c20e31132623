use serde::{Deserialize, Serialize};

/// Position of a lead in the sales pipeline.
///
/// The set is fixed and ordered; board rendering and bulk moves follow
/// the order of [`PipelineStage::ALL`]. Serialized names match the
/// historical storage format, so exported data stays readable by the
/// old tracker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    #[serde(rename = "New Lead")]
    NewLead,
    #[serde(rename = "Contacted")]
    Contacted,
    #[serde(rename = "Demo Active")]
    DemoActive,
    #[serde(rename = "Closed - Paid")]
    ClosedPaid,
    #[serde(rename = "Delayed")]
    Delayed,
    #[serde(rename = "Lost - Refused")]
    LostRefused,
}

impl PipelineStage {
    pub const ALL: [PipelineStage; 6] = [
        PipelineStage::NewLead,
        PipelineStage::Contacted,
        PipelineStage::DemoActive,
        PipelineStage::ClosedPaid,
        PipelineStage::Delayed,
        PipelineStage::LostRefused,
    ];

    /// Terminal color used when rendering board columns.
    pub fn color(&self) -> colored::Color {
        match self {
            PipelineStage::NewLead => colored::Color::Blue,
            PipelineStage::Contacted => colored::Color::Magenta,
            PipelineStage::DemoActive => colored::Color::Yellow,
            PipelineStage::ClosedPaid => colored::Color::Green,
            PipelineStage::Delayed => colored::Color::BrightYellow,
            PipelineStage::LostRefused => colored::Color::Red,
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::NewLead => write!(f, "New Lead"),
            PipelineStage::Contacted => write!(f, "Contacted"),
            PipelineStage::DemoActive => write!(f, "Demo Active"),
            PipelineStage::ClosedPaid => write!(f, "Closed - Paid"),
            PipelineStage::Delayed => write!(f, "Delayed"),
            PipelineStage::LostRefused => write!(f, "Lost - Refused"),
        }
    }
}

impl std::str::FromStr for PipelineStage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '_'], "-").as_str() {
            "new-lead" | "new" => Ok(PipelineStage::NewLead),
            "contacted" => Ok(PipelineStage::Contacted),
            "demo-active" | "demo" => Ok(PipelineStage::DemoActive),
            "closed---paid" | "closed-paid" | "closed" | "paid" => Ok(PipelineStage::ClosedPaid),
            "delayed" => Ok(PipelineStage::Delayed),
            "lost---refused" | "lost-refused" | "lost" | "refused" => {
                Ok(PipelineStage::LostRefused)
            }
            _ => anyhow::bail!(
                "Invalid pipeline stage: {s}. Valid values: new-lead, contacted, demo-active, closed-paid, delayed, lost-refused"
            ),
        }
    }
}

/// Installment progress of a closed sale.
///
/// Ordering matters: [`PaymentStage::index`] is the 0-based position used
/// by the payment follow-up alert (which looks at the previous
/// installment's date) and by the advance guard in the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentStage {
    #[serde(rename = "Upfront Installment")]
    Upfront,
    #[serde(rename = "Second Installment")]
    Second,
    #[serde(rename = "Third Installment")]
    Third,
    #[serde(rename = "Fourth Installment")]
    Fourth,
    #[serde(rename = "Done")]
    Done,
}

impl PaymentStage {
    pub const ALL: [PaymentStage; 5] = [
        PaymentStage::Upfront,
        PaymentStage::Second,
        PaymentStage::Third,
        PaymentStage::Fourth,
        PaymentStage::Done,
    ];

    /// 0-based position in the fixed payment ordering.
    pub fn index(&self) -> usize {
        match self {
            PaymentStage::Upfront => 0,
            PaymentStage::Second => 1,
            PaymentStage::Third => 2,
            PaymentStage::Fourth => 3,
            PaymentStage::Done => 4,
        }
    }

    /// The stage that follows this one, or `None` past `Done`.
    pub fn next(&self) -> Option<PaymentStage> {
        match self {
            PaymentStage::Upfront => Some(PaymentStage::Second),
            PaymentStage::Second => Some(PaymentStage::Third),
            PaymentStage::Third => Some(PaymentStage::Fourth),
            PaymentStage::Fourth => Some(PaymentStage::Done),
            PaymentStage::Done => None,
        }
    }
}

impl std::fmt::Display for PaymentStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStage::Upfront => write!(f, "Upfront Installment"),
            PaymentStage::Second => write!(f, "Second Installment"),
            PaymentStage::Third => write!(f, "Third Installment"),
            PaymentStage::Fourth => write!(f, "Fourth Installment"),
            PaymentStage::Done => write!(f, "Done"),
        }
    }
}

impl std::str::FromStr for PaymentStage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upfront" | "upfront installment" => Ok(PaymentStage::Upfront),
            "second" | "second installment" => Ok(PaymentStage::Second),
            "third" | "third installment" => Ok(PaymentStage::Third),
            "fourth" | "fourth installment" => Ok(PaymentStage::Fourth),
            "done" => Ok(PaymentStage::Done),
            _ => anyhow::bail!(
                "Invalid payment stage: {s}. Valid values: upfront, second, third, fourth, done"
            ),
        }
    }
}

/// Day bucket of an active demo trial (three-day window).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoDay {
    Day1,
    Day2,
    Day3,
}

impl DemoDay {
    pub const ALL: [DemoDay; 3] = [DemoDay::Day1, DemoDay::Day2, DemoDay::Day3];

    /// Bucket for a demo that started `elapsed_days` calendar days ago.
    /// Returns `None` for demos that have not started yet.
    pub fn for_elapsed(elapsed_days: i64) -> Option<DemoDay> {
        match elapsed_days {
            0 => Some(DemoDay::Day1),
            1 => Some(DemoDay::Day2),
            d if d >= 2 => Some(DemoDay::Day3),
            _ => None,
        }
    }
}

impl std::fmt::Display for DemoDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DemoDay::Day1 => write!(f, "Day 1"),
            DemoDay::Day2 => write!(f, "Day 2"),
            DemoDay::Day3 => write!(f, "Day 3"),
        }
    }
}

/// Kind of customer behind a lead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClientType {
    #[serde(rename = "Private Teacher")]
    PrivateTeacher,
    #[serde(rename = "Center")]
    Center,
}

impl std::fmt::Display for ClientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientType::PrivateTeacher => write!(f, "Private Teacher"),
            ClientType::Center => write!(f, "Center"),
        }
    }
}

impl std::str::FromStr for ClientType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '_'], "-").as_str() {
            "private-teacher" | "teacher" | "private" => Ok(ClientType::PrivateTeacher),
            "center" => Ok(ClientType::Center),
            _ => anyhow::bail!("Invalid client type: {s}. Valid values: private-teacher, center"),
        }
    }
}

/// Bank account a closed sale is billed through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RibType {
    #[serde(rename = "Private RIB")]
    Private,
    #[serde(rename = "Cyber Ocean RIB")]
    CyberOcean,
}

impl std::fmt::Display for RibType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RibType::Private => write!(f, "Private RIB"),
            RibType::CyberOcean => write!(f, "Cyber Ocean RIB"),
        }
    }
}

impl std::str::FromStr for RibType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '_'], "-").as_str() {
            "private" | "private-rib" => Ok(RibType::Private),
            "cyber-ocean" | "cyber-ocean-rib" | "cyberocean" => Ok(RibType::CyberOcean),
            _ => anyhow::bail!("Invalid RIB type: {s}. Valid values: private, cyber-ocean"),
        }
    }
}

/// Why a lead was lost or delayed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LostReason {
    Price,
    Timing,
    Competition,
    #[serde(rename = "No Response")]
    NoResponse,
    Other,
}

impl LostReason {
    pub const ALL: [LostReason; 5] = [
        LostReason::Price,
        LostReason::Timing,
        LostReason::Competition,
        LostReason::NoResponse,
        LostReason::Other,
    ];
}

impl std::fmt::Display for LostReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LostReason::Price => write!(f, "Price"),
            LostReason::Timing => write!(f, "Timing"),
            LostReason::Competition => write!(f, "Competition"),
            LostReason::NoResponse => write!(f, "No Response"),
            LostReason::Other => write!(f, "Other"),
        }
    }
}

impl std::str::FromStr for LostReason {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '_'], "-").as_str() {
            "price" => Ok(LostReason::Price),
            "timing" => Ok(LostReason::Timing),
            "competition" => Ok(LostReason::Competition),
            "no-response" | "noresponse" => Ok(LostReason::NoResponse),
            "other" => Ok(LostReason::Other),
            _ => anyhow::bail!(
                "Invalid reason: {s}. Valid values: price, timing, competition, no-response, other"
            ),
        }
    }
}
