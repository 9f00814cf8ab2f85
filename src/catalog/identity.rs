use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Numeric row id of a category.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

/// Numeric row id of a vendor.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(pub u64);

/// Numeric row id of a catalog component.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub u64);

/// Numeric row id of a saved build.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildId(pub u64);

/// Numeric row id of a stored compatibility rule.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub u64);

/// Stable string key for a category (`cpu`, `motherboard`, ...).
///
/// Rules and predicates only ever look at the slug; display names are for
/// humans.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySlug(pub String);

impl CategorySlug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name carried in a rule condition's `rule` field.
///
/// The six known predicates get their own variants so dispatch is an
/// exhaustive match; `Unknown` keeps the raw name so newer rule vocabulary in
/// the data degrades to a pass-through instead of failing older binaries.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum RuleKind {
    SocketMatch,
    GpuLengthFit,
    CoolerHeightFit,
    PsuLengthFit,
    PowerRequirement,
    FormFactorMatch,
    Unknown(String),
}

impl RuleKind {
    pub const KNOWN: [RuleKind; 6] = [
        RuleKind::SocketMatch,
        RuleKind::GpuLengthFit,
        RuleKind::CoolerHeightFit,
        RuleKind::PsuLengthFit,
        RuleKind::PowerRequirement,
        RuleKind::FormFactorMatch,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            RuleKind::SocketMatch => "socket_match",
            RuleKind::GpuLengthFit => "gpu_length_fit",
            RuleKind::CoolerHeightFit => "cooler_height_fit",
            RuleKind::PsuLengthFit => "psu_length_fit",
            RuleKind::PowerRequirement => "power_requirement",
            RuleKind::FormFactorMatch => "form_factor_match",
            RuleKind::Unknown(value) => value.as_str(),
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "socket_match" => RuleKind::SocketMatch,
            "gpu_length_fit" => RuleKind::GpuLengthFit,
            "cooler_height_fit" => RuleKind::CoolerHeightFit,
            "psu_length_fit" => RuleKind::PsuLengthFit,
            "power_requirement" => RuleKind::PowerRequirement,
            "form_factor_match" => RuleKind::FormFactorMatch,
            other => RuleKind::Unknown(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, RuleKind::Unknown(_))
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RuleKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RuleKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// Motherboard/case form factor.
///
/// Strings are matched exactly as stored (`ATX`, `mATX`, `ITX`); anything else
/// lands in `Other` and, on the case side, supports no boards at all.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum FormFactor {
    Atx,
    MicroAtx,
    Itx,
    Other(String),
}

impl FormFactor {
    pub fn as_str(&self) -> &str {
        match self {
            FormFactor::Atx => "ATX",
            FormFactor::MicroAtx => "mATX",
            FormFactor::Itx => "ITX",
            FormFactor::Other(value) => value.as_str(),
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "ATX" => FormFactor::Atx,
            "mATX" => FormFactor::MicroAtx,
            "ITX" => FormFactor::Itx,
            other => FormFactor::Other(other.to_string()),
        }
    }

    /// Board form factors a case of this form factor accepts.
    pub fn supported_boards(&self) -> &'static [FormFactor] {
        const ATX: &[FormFactor] = &[FormFactor::Atx, FormFactor::MicroAtx, FormFactor::Itx];
        const MATX: &[FormFactor] = &[FormFactor::MicroAtx, FormFactor::Itx];
        const ITX: &[FormFactor] = &[FormFactor::Itx];
        match self {
            FormFactor::Atx => ATX,
            FormFactor::MicroAtx => MATX,
            FormFactor::Itx => ITX,
            FormFactor::Other(_) => &[],
        }
    }

    /// Whether a case with this form factor takes `board`.
    pub fn accepts(&self, board: &FormFactor) -> bool {
        self.supported_boards().contains(board)
    }
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FormFactor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FormFactor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}
