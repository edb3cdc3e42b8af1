//! Request and response bodies of the supported operations.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::types::{ActorType, Amount, AnyJson, RefundDestination};

// === Requests ===

/// Body of `dana.acquiring.order.createOrder`.
#[derive(Builder, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub order: Order,
    #[builder(into)]
    pub merchant_id: String,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcc: Option<String>,
    #[builder(into)]
    pub product_code: String,
    pub env_info: EnvInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_urls: Option<Vec<NotificationUrl>>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extend_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_preference: Option<PaymentPreference>,
}

#[derive(Builder, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    #[builder(into)]
    pub order_title: String,
    /// Order amount as the caller states it. Converted to minor units when sent.
    pub order_amount: Amount,
    #[builder(into)]
    pub merchant_trans_id: String,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_trans_type: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_memo: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goods: Option<Vec<Good>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_info: Option<Vec<ShippingInfo>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Good {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_goods_id: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub price: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_shipping_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extend_info: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingInfo {
    pub merchant_shipping_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_amount: Option<Amount>,
    pub country_name: String,
    pub state_name: String,
    pub city_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_name: Option<String>,
    pub address1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<String>,
    pub zip_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax_no: Option<String>,
}

/// Buyer environment, as seen by the merchant.
#[derive(Builder, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvInfo {
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_language: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_type: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk_version: Option<String>,
    #[builder(into)]
    pub source_platform: String,
    #[builder(into)]
    pub terminal_type: String,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_key: Option<String>,
    #[builder(into)]
    pub order_terminal_type: String,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_os_type: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_app_version: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extend_info: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationUrl {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPreference {
    pub disabled_pay_methods: String,
}

/// Body of `dana.acquiring.order.query`. Identify the order by either id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQueryRequest {
    pub merchant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquirement_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_trans_id: Option<String>,
}

impl OrderQueryRequest {
    pub fn by_acquirement_id(merchant_id: impl Into<String>, acquirement_id: impl Into<String>) -> Self {
        OrderQueryRequest {
            merchant_id: merchant_id.into(),
            acquirement_id: Some(acquirement_id.into()),
            merchant_trans_id: None,
        }
    }

    pub fn by_merchant_trans_id(
        merchant_id: impl Into<String>,
        merchant_trans_id: impl Into<String>,
    ) -> Self {
        OrderQueryRequest {
            merchant_id: merchant_id.into(),
            acquirement_id: None,
            merchant_trans_id: Some(merchant_trans_id.into()),
        }
    }
}

/// Body of `dana.acquiring.refund.refund`.
#[derive(Builder, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    #[builder(into)]
    pub request_id: String,
    #[builder(into)]
    pub merchant_id: String,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquirement_id: Option<String>,
    /// Refund amount as the caller states it. Converted to minor units when sent.
    pub refund_amount: Amount,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_applied_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_type: Option<ActorType>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_charge_to_payer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<RefundDestination>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extend_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_info: Option<EnvInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_info: Option<AuditInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_context: Option<ActorContext>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third_client_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorContext {
    pub actor_id: String,
    pub actor_type: ActorType,
}

pub const GRANT_TYPE_AUTHORIZATION_CODE: &str = "AUTHORIZATION_CODE";
pub const GRANT_TYPE_REFRESH_TOKEN: &str = "REFRESH_TOKEN";

/// Body of `dana.oauth.auth.applyToken`.
///
/// All three fields are always sent; the unused one is an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyTokenRequest {
    pub grant_type: String,
    pub auth_code: String,
    pub refresh_token: String,
}

impl ApplyTokenRequest {
    /// Exchange an authorization code for an access token.
    pub fn authorization_code(auth_code: impl Into<String>) -> Self {
        ApplyTokenRequest {
            grant_type: GRANT_TYPE_AUTHORIZATION_CODE.to_string(),
            auth_code: auth_code.into(),
            refresh_token: String::new(),
        }
    }

    /// Renew an access token.
    pub fn refresh_token(refresh_token: impl Into<String>) -> Self {
        ApplyTokenRequest {
            grant_type: GRANT_TYPE_REFRESH_TOKEN.to_string(),
            auth_code: String::new(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Body of `dana.member.query.queryUserProfile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileRequest {
    pub user_resources: Vec<String>,
}

/// Body of `customers.openapi.user.inquiryUserInfoByAccessToken`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryUserInfoRequest {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extend_info: Option<String>,
}

// === Responses ===
//
// Optional fields are `Option`s with defaults so that absent or `null` values decode.

/// Outcome block present in every response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_code_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub result_info: ResultInfo,
    #[serde(default)]
    pub merchant_trans_id: Option<String>,
    #[serde(default)]
    pub acquirement_id: Option<String>,
    #[serde(default)]
    pub checkout_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub result_info: ResultInfo,
    #[serde(default)]
    pub acquirement_id: Option<String>,
    #[serde(default)]
    pub merchant_trans_id: Option<String>,
    #[serde(default)]
    pub buyer: Option<OrderParty>,
    #[serde(default)]
    pub seller: Option<OrderParty>,
    #[serde(default)]
    pub order_title: Option<String>,
    #[serde(default)]
    pub extended_info: Option<String>,
    #[serde(default)]
    pub amount_detail: Option<AmountDetail>,
    #[serde(default)]
    pub time_detail: Option<TimeDetail>,
    #[serde(default)]
    pub status_detail: Option<StatusDetail>,
    #[serde(default)]
    pub goods: Option<Vec<Good>>,
    #[serde(default)]
    pub shipping_info: Option<Vec<ShippingInfo>>,
    #[serde(default)]
    pub order_memo: Option<String>,
    #[serde(default)]
    pub payment_views: Option<Vec<PaymentView>>,
}

/// Buyer or seller of an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderParty {
    pub user_id: Option<String>,
    pub external_user_id: Option<String>,
    pub external_user_type: Option<String>,
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountDetail {
    pub order_amount: Amount,
    #[serde(default)]
    pub pay_amount: Option<Amount>,
    #[serde(default)]
    pub void_amount: Option<Amount>,
    #[serde(default)]
    pub confirm_amount: Option<Amount>,
    #[serde(default)]
    pub refund_amount: Option<Amount>,
    #[serde(default)]
    pub chargeback_amount: Option<Amount>,
    #[serde(default)]
    pub charge_amount: Option<Amount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeDetail {
    pub created_time: String,
    pub expiry_time: String,
    #[serde(default)]
    pub paid_times: Option<Vec<String>>,
    #[serde(default)]
    pub confirmed_times: Option<Vec<String>>,
    #[serde(default)]
    pub cancelled_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDetail {
    pub acquirement_status: String,
    pub frozen: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    pub cashier_request_id: String,
    pub paid_time: String,
    pub pay_option_infos: Vec<PayOptionInfo>,
    #[serde(default)]
    pub pay_request_extend_info: Option<String>,
    #[serde(default)]
    pub extend_info: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayOptionInfo {
    /// Wire name of the method; see [`PayMethod`](crate::types::PayMethod) for known values.
    pub pay_method: String,
    pub pay_amount: Amount,
    #[serde(default)]
    pub trans_amount: Option<Amount>,
    #[serde(default)]
    pub charge_amount: Option<Amount>,
    #[serde(default)]
    pub extend_info: Option<String>,
    #[serde(default)]
    pub pay_option_bill_extend_info: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundResponse {
    pub result_info: ResultInfo,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub refund_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessTokenInfo {
    pub access_token: String,
    pub expires_in: String,
    pub refresh_token: String,
    pub re_expires_in: String,
    pub token_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyTokenResponse {
    pub result_info: ResultInfo,
    /// Absent when the gateway rejects the grant.
    #[serde(default)]
    pub access_token_info: Option<AccessTokenInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResourceInfo {
    pub resource_type: String,
    #[serde(default)]
    pub value: AnyJson,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub result_info: ResultInfo,
    #[serde(default)]
    pub user_resource_infos: Vec<UserResourceInfo>,
}

/// Bare (unsigned) body returned by the user-info inquiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryUserInfoResponse {
    pub result: ResultInfo,
    #[serde(default)]
    pub user_info: Option<UserInfoDetail>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfoDetail {
    #[serde(rename = "USER_CONTACTINFO_EMAIL")]
    pub contact_email: Option<String>,
    #[serde(rename = "USER_NAME")]
    pub name: Option<String>,
    #[serde(rename = "USER_ADDRESS")]
    pub addresses: Option<Vec<UserAddress>>,
    #[serde(rename = "USER_CONTACTINFO")]
    pub contact_info: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAddress {
    pub area: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub address1: Option<String>,
}
