//! The fixed table of gateway operations.
//!
//! Every operation statically declares its path, its function name and the envelope
//! convention it uses. Nothing is inferred from the path at runtime.

use std::{borrow::Cow, fmt::Display};

use serde::{Serialize, de::DeserializeOwned};

use crate::types::{
    ApplyTokenRequest, ApplyTokenResponse, InquiryUserInfoRequest, InquiryUserInfoResponse,
    OrderDetail, OrderQueryRequest, OrderRequest, OrderResponse, RefundRequest, RefundResponse,
    UserProfileRequest, UserProfileResponse,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateOrder,
    QueryOrder,
    Refund,
    ApplyAccessToken,
    QueryUserProfile,
    InquiryUserInfo,
}

/// How an operation's request and response are wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvelopeStyle {
    /// Head and body embedded in a signed JSON envelope; responses are signed too.
    Signed,
    /// Bare JSON body with identity and signature in HTTP headers; responses are unsigned.
    Legacy,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::CreateOrder,
        Operation::QueryOrder,
        Operation::Refund,
        Operation::ApplyAccessToken,
        Operation::QueryUserProfile,
        Operation::InquiryUserInfo,
    ];

    /// Path relative to the gateway base URL.
    pub const fn path(self) -> &'static str {
        match self {
            Operation::CreateOrder => "alipayplus/acquiring/order/createOrder.htm",
            Operation::QueryOrder => "alipayplus/acquiring/order/query.htm",
            Operation::Refund => "alipayplus/acquiring/refund/refund.htm",
            Operation::ApplyAccessToken => "dana/oauth/auth/applyToken.htm",
            Operation::QueryUserProfile => "alipayplus/member/query/queryUserProfile.htm",
            Operation::InquiryUserInfo => "v1/customers/user/inquiryUserInfoByAccessToken.htm",
        }
    }

    /// Function name placed in the request header.
    pub const fn function(self) -> &'static str {
        match self {
            Operation::CreateOrder => "dana.acquiring.order.createOrder",
            Operation::QueryOrder => "dana.acquiring.order.query",
            Operation::Refund => "dana.acquiring.refund.refund",
            Operation::ApplyAccessToken => "dana.oauth.auth.applyToken",
            Operation::QueryUserProfile => "dana.member.query.queryUserProfile",
            Operation::InquiryUserInfo => "customers.openapi.user.inquiryUserInfoByAccessToken",
        }
    }

    pub const fn envelope_style(self) -> EnvelopeStyle {
        match self {
            Operation::InquiryUserInfo => EnvelopeStyle::Legacy,
            Operation::CreateOrder
            | Operation::QueryOrder
            | Operation::Refund
            | Operation::ApplyAccessToken
            | Operation::QueryUserProfile => EnvelopeStyle::Signed,
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.function())
    }
}

/// A typed binding of an [`Operation`] to its request and result types.
pub trait Endpoint {
    const OPERATION: Operation;

    type Request: Serialize + Clone;
    type Response: DeserializeOwned;

    /// Adjust the caller's request before it is enveloped. The caller's value is left as is.
    fn prepare(request: &Self::Request) -> Cow<'_, Self::Request> {
        Cow::Borrowed(request)
    }
}

pub struct CreateOrder;

impl Endpoint for CreateOrder {
    const OPERATION: Operation = Operation::CreateOrder;
    type Request = OrderRequest;
    type Response = OrderResponse;

    fn prepare(request: &OrderRequest) -> Cow<'_, OrderRequest> {
        let mut request = request.clone();
        request.order.order_amount = request.order.order_amount.to_minor_units();
        Cow::Owned(request)
    }
}

pub struct QueryOrder;

impl Endpoint for QueryOrder {
    const OPERATION: Operation = Operation::QueryOrder;
    type Request = OrderQueryRequest;
    type Response = OrderDetail;
}

pub struct Refund;

impl Endpoint for Refund {
    const OPERATION: Operation = Operation::Refund;
    type Request = RefundRequest;
    type Response = RefundResponse;

    fn prepare(request: &RefundRequest) -> Cow<'_, RefundRequest> {
        let mut request = request.clone();
        request.refund_amount = request.refund_amount.to_minor_units();
        Cow::Owned(request)
    }
}

pub struct ApplyAccessToken;

impl Endpoint for ApplyAccessToken {
    const OPERATION: Operation = Operation::ApplyAccessToken;
    type Request = ApplyTokenRequest;
    type Response = ApplyTokenResponse;
}

pub struct QueryUserProfile;

impl Endpoint for QueryUserProfile {
    const OPERATION: Operation = Operation::QueryUserProfile;
    type Request = UserProfileRequest;
    type Response = UserProfileResponse;
}

pub struct InquiryUserInfo;

impl Endpoint for InquiryUserInfo {
    const OPERATION: Operation = Operation::InquiryUserInfo;
    type Request = InquiryUserInfoRequest;
    type Response = InquiryUserInfoResponse;
}
