use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;

/// Storage partition a file lives in.
///
/// Access control for private files is enforced by the route layer; the partition
/// only selects which root directory the bytes are written under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    #[default]
    Public,
    Private,
}

impl Partition {
    pub fn from_private_flag(is_private: bool) -> Self {
        if is_private {
            Partition::Private
        } else {
            Partition::Public
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Partition::Private)
    }
}

impl FromStr for Partition {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Partition::Public),
            "private" => Ok(Partition::Private),
            _ => Err(anyhow::anyhow!("Invalid partition: {}", s)),
        }
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Partition::Public => write!(f, "public"),
            Partition::Private => write!(f, "private"),
        }
    }
}
