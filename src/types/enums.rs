use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Payment methods a buyer can settle an order with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayMethod {
    Balance,
    Coupon,
    NetBanking,
    CreditCard,
    DebitCard,
    VirtualAccount,
    Otc,
    DirectDebitCreditCard,
    DirectDebitDebitCard,
}

impl PayMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayMethod::Balance => "BALANCE",
            PayMethod::Coupon => "COUPON",
            PayMethod::NetBanking => "NET_BANKING",
            PayMethod::CreditCard => "CREDIT_CARD",
            PayMethod::DebitCard => "DEBIT_CARD",
            PayMethod::VirtualAccount => "VIRTUAL_ACCOUNT",
            PayMethod::Otc => "OTC",
            PayMethod::DirectDebitCreditCard => "DIRECT_DEBIT_CREDIT_CARD",
            PayMethod::DirectDebitDebitCard => "DIRECT_DEBIT_DEBIT_CARD",
        }
    }
}

impl Display for PayMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who initiated an action such as a refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorType {
    User,
    Merchant,
    MerchantOperator,
    BackOffice,
    System,
}

impl ActorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorType::User => "USER",
            ActorType::Merchant => "MERCHANT",
            ActorType::MerchantOperator => "MERCHANT_OPERATOR",
            ActorType::BackOffice => "BACK_OFFICE",
            ActorType::System => "SYSTEM",
        }
    }
}

impl Display for ActorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where refunded funds go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundDestination {
    ToBalance,
    ToSource,
}

impl RefundDestination {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundDestination::ToBalance => "TO_BALANCE",
            RefundDestination::ToSource => "TO_SOURCE",
        }
    }
}

impl Display for RefundDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
