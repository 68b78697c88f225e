use crate::model::nullable;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Paid plan tier. Sent as an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubscriptionPlan {
    #[default]
    Basic,
    Standard,
    Premium,
}

impl SubscriptionPlan {
    pub fn code(self) -> u8 {
        match self {
            SubscriptionPlan::Basic => 0,
            SubscriptionPlan::Standard => 1,
            SubscriptionPlan::Premium => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(SubscriptionPlan::Basic),
            1 => Some(SubscriptionPlan::Standard),
            2 => Some(SubscriptionPlan::Premium),
            _ => None,
        }
    }
}

impl Serialize for SubscriptionPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for SubscriptionPlan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i64::deserialize(deserializer)?;
        Self::from_code(code).ok_or_else(|| D::Error::custom(format!("unknown plan {}", code)))
    }
}

/// Whether the account currently pays. Sent as an integer, `1` by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubscriptionStatus {
    Subscribed,
    #[default]
    NotSubscribed,
}

impl SubscriptionStatus {
    pub fn code(self) -> u8 {
        match self {
            SubscriptionStatus::Subscribed => 0,
            SubscriptionStatus::NotSubscribed => 1,
        }
    }
}

impl Serialize for SubscriptionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for SubscriptionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match i64::deserialize(deserializer)? {
            0 => Ok(SubscriptionStatus::Subscribed),
            1 => Ok(SubscriptionStatus::NotSubscribed),
            other => Err(D::Error::custom(format!("unknown subscription status {}", other))),
        }
    }
}

/// A manager's plan purchase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Subscription {
    pub id: Option<i64>,
    #[serde(deserialize_with = "nullable::or_default")]
    pub plan: SubscriptionPlan,
    #[serde(deserialize_with = "nullable::or_default")]
    pub pay_pal_transaction_id: String,
    // Older backends spell it `statu`.
    #[serde(alias = "statu", deserialize_with = "nullable::or_default")]
    pub status: SubscriptionStatus,
}

/// Payload for creating or replacing a subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDraft {
    pub plan: SubscriptionPlan,
    pub pay_pal_transaction_id: String,
    pub status: SubscriptionStatus,
}
