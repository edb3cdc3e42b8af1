mod common;

use std::{
    collections::HashSet,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use common::{
    MockTransport, client, client_keys, envelope_of, gateway_keys, merchant, signed_response,
    signed_response_with, success,
};
use dana_kit::{
    Error, KeyMaterial, Verification,
    canonical::canonical_bytes,
    envelope::{HEADER_CLIENT_ID, HEADER_REQUEST_TIME, HEADER_SIGNATURE},
    errors::SignatureError,
    transport::{TransportError, WireResponse},
    types::{
        Amount, ApplyTokenRequest, EnvInfo, InquiryUserInfoRequest, Order, OrderQueryRequest,
        OrderRequest, RefundRequest, UserProfileRequest,
    },
};
use futures_util::future::join_all;
use http::StatusCode;
use serde_json::{Value, json};

fn merchant_verifier() -> KeyMaterial {
    KeyMaterial::verify_only(&merchant().public_pem).unwrap()
}

fn order_request(value: &str) -> OrderRequest {
    OrderRequest::builder()
        .order(
            Order::builder()
                .order_title("Kopi Susu")
                .order_amount(Amount::idr(value))
                .merchant_trans_id("TRX-20261019-0001")
                .build(),
        )
        .merchant_id("216620000000000000000")
        .product_code("51051000100000000001")
        .env_info(
            EnvInfo::builder()
                .source_platform("IPG")
                .terminal_type("SYSTEM")
                .order_terminal_type("WEB")
                .build(),
        )
        .build()
}

#[tokio::test]
async fn test_apply_access_token_round_trip() {
    let client = client(MockTransport::new(|request| {
        assert_eq!(request.path, "dana/oauth/auth/applyToken.htm");
        Ok(signed_response(
            request,
            json!({
                "resultInfo": success(),
                "accessTokenInfo": {
                    "accessToken": "at-123",
                    "expiresIn": "1800",
                    "refreshToken": "rt-456",
                    "reExpiresIn": "86400",
                    "tokenStatus": "VALID"
                }
            }),
        ))
    }));

    let response = client
        .apply_access_token(&ApplyTokenRequest::authorization_code("ABC"))
        .await
        .unwrap();

    assert_eq!(response.verification, Verification::Verified);
    let token = response.body.access_token_info.unwrap();
    assert_eq!(token.access_token, "at-123");
    assert_eq!(token.refresh_token, "rt-456");

    let sent = client.transport().sent();
    assert_eq!(sent.len(), 1);
    let envelope = envelope_of(&sent[0]);
    let head = &envelope["request"]["head"];
    assert_eq!(head["function"], "dana.oauth.auth.applyToken");
    assert_eq!(head["clientSecret"], "client-secret");
    assert!(head.get("accessToken").is_none());
    assert_eq!(
        response.head.unwrap().req_msg_id,
        head["reqMsgId"].as_str().unwrap()
    );

    // The gateway can check the request against the merchant's public key.
    let signed = canonical_bytes(&envelope["request"]).unwrap();
    merchant_verifier()
        .verify(&signed, envelope["signature"].as_str().unwrap())
        .unwrap();
}

#[tokio::test]
async fn test_create_order_sends_minor_units() {
    let client = client(MockTransport::new(|request| {
        Ok(signed_response(
            request,
            json!({
                "resultInfo": success(),
                "merchantTransId": "TRX-20261019-0001",
                "acquirementId": "20261019111212800110166",
                "checkoutUrl": "https://m.dana.id/m/portal/cashier/checkout?bizNo=1"
            }),
        ))
    }));
    let request = order_request("10000");

    let response = client.create_order(&request, Some("at-123")).await.unwrap();
    assert_eq!(
        response.body.checkout_url.as_deref(),
        Some("https://m.dana.id/m/portal/cashier/checkout?bizNo=1")
    );

    let envelope = envelope_of(&client.transport().sent()[0]);
    assert_eq!(
        envelope["request"]["body"]["order"]["orderAmount"],
        json!({ "currency": "IDR", "value": "1000000" })
    );
    assert_eq!(envelope["request"]["head"]["accessToken"], "at-123");
    // The caller's request is untouched.
    assert_eq!(request.order.order_amount.value.as_str(), "10000");
}

#[tokio::test]
async fn test_refund_and_query_order() {
    let client = client(MockTransport::new(|request| {
        let body = match request.path {
            "alipayplus/acquiring/refund/refund.htm" => json!({
                "resultInfo": success(),
                "requestId": "REF-1",
                "refundId": "2026101900000001"
            }),
            "alipayplus/acquiring/order/query.htm" => json!({
                "resultInfo": success(),
                "acquirementId": "20261019111212800110166",
                "amountDetail": { "orderAmount": { "currency": "IDR", "value": "1000000" } },
                "statusDetail": { "acquirementStatus": "SUCCESS", "frozen": false }
            }),
            other => panic!("unexpected path {other}"),
        };
        Ok(signed_response(request, body))
    }));

    let refund = client
        .refund(
            &RefundRequest::builder()
                .request_id("REF-1")
                .merchant_id("216620000000000000000")
                .acquirement_id("20261019111212800110166")
                .refund_amount(Amount::idr("2500"))
                .build(),
            Some("at-123"),
        )
        .await
        .unwrap();
    assert_eq!(refund.body.refund_id.as_deref(), Some("2026101900000001"));

    let order = client
        .query_order(
            &OrderQueryRequest::by_acquirement_id(
                "216620000000000000000",
                "20261019111212800110166",
            ),
            None,
        )
        .await
        .unwrap()
        .into_body();
    assert_eq!(order.status_detail.unwrap().acquirement_status, "SUCCESS");

    let sent = client.transport().sent();
    assert_eq!(
        envelope_of(&sent[0])["request"]["body"]["refundAmount"]["value"],
        "250000"
    );
    assert_eq!(
        envelope_of(&sent[1])["request"]["head"]["function"],
        "dana.acquiring.order.query"
    );
}

#[tokio::test]
async fn test_query_user_profile() {
    let client = client(MockTransport::new(|request| {
        Ok(signed_response(
            request,
            json!({
                "resultInfo": success(),
                "userResourceInfos": [
                    { "resourceType": "MASK_DANA_ID", "value": "0812****7890" },
                    { "resourceType": "BALANCE", "value": { "currency": "IDR", "value": "500000" } }
                ]
            }),
        ))
    }));

    let profile = client
        .query_user_profile(
            &UserProfileRequest {
                user_resources: vec!["MASK_DANA_ID".to_string(), "BALANCE".to_string()],
            },
            Some("at-123"),
        )
        .await
        .unwrap()
        .into_body();

    assert_eq!(profile.user_resource_infos.len(), 2);
    assert_eq!(profile.user_resource_infos[0].value, json!("0812****7890"));
}

#[tokio::test]
async fn test_non_ok_status_is_a_transport_error() {
    let client = client(MockTransport::new(|_| {
        Ok(WireResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "gateway exploded",
        ))
    }));

    let err = client
        .query_order(&OrderQueryRequest::by_merchant_trans_id("M", "T"), None)
        .await
        .unwrap_err();

    assert_eq!(err.operation(), Some("dana.acquiring.order.query"));
    match err {
        Error::Transport {
            source: TransportError::Status { status, body },
            ..
        } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "gateway exploded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let client = client(MockTransport::new(|_| Err(TransportError::Timeout)));

    let err = client
        .apply_access_token(&ApplyTokenRequest::refresh_token("rt-456"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Transport {
            operation: "dana.oauth.auth.applyToken",
            source: TransportError::Timeout,
        }
    ));
}

#[tokio::test]
async fn test_response_signed_by_wrong_key_is_rejected() {
    let client = client(MockTransport::new(|request| {
        // Signed with the merchant key instead of the gateway key.
        Ok(WireResponse::ok(signed_response_with(
            &client_keys(),
            request,
            json!({ "resultInfo": success() }),
        )))
    }));

    let err = client
        .apply_access_token(&ApplyTokenRequest::authorization_code("ABC"))
        .await
        .unwrap_err();

    assert!(err.is_signature());
    assert!(matches!(
        err,
        Error::Signature {
            source: SignatureError::Mismatch(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_tampered_response_is_rejected() {
    let client = client(MockTransport::new(|request| {
        let raw = signed_response_with(
            &gateway_keys(),
            request,
            json!({ "resultInfo": success(), "refundId": "1111" }),
        );
        let tampered = String::from_utf8(raw).unwrap().replace("1111", "9999");
        Ok(WireResponse::ok(tampered))
    }));

    let err = client
        .refund(
            &RefundRequest::builder()
                .request_id("REF-2")
                .merchant_id("M")
                .refund_amount(Amount::idr("1"))
                .build(),
            None,
        )
        .await
        .unwrap_err();

    assert!(err.is_signature());
}

#[tokio::test]
async fn test_missing_signature_is_rejected() {
    let client = client(MockTransport::new(|request| {
        let mut envelope: Value = serde_json::from_slice(&signed_response_with(
            &gateway_keys(),
            request,
            json!({ "resultInfo": success() }),
        ))
        .unwrap();
        envelope.as_object_mut().unwrap().remove("signature");
        Ok(WireResponse::ok(serde_json::to_vec(&envelope).unwrap()))
    }));

    let err = client
        .apply_access_token(&ApplyTokenRequest::authorization_code("ABC"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Signature {
            source: SignatureError::MissingSignature,
            ..
        }
    ));
}

#[tokio::test]
async fn test_legacy_inquiry_skips_verification() {
    let client = client(MockTransport::new(|request| {
        assert_eq!(
            request.path,
            "v1/customers/user/inquiryUserInfoByAccessToken.htm"
        );
        // A bogus signature on a legacy response is ignored.
        Ok(WireResponse::ok(
            serde_json::to_vec(&json!({
                "result": { "resultCode": "SUCCESS", "resultMessage": "success" },
                "userInfo": {
                    "USER_NAME": "Budi",
                    "USER_CONTACTINFO_EMAIL": "budi@example.com"
                },
                "signature": "not-a-real-signature"
            }))
            .unwrap(),
        ))
    }));

    let response = client
        .inquiry_user_info(
            &InquiryUserInfoRequest {
                access_token: "at-123".to_string(),
                extend_info: None,
            },
            Some("at-123"),
        )
        .await
        .unwrap();

    assert_eq!(response.verification, Verification::Skipped);
    assert!(response.head.is_none());
    let user = response.body.user_info.unwrap();
    assert_eq!(user.name.as_deref(), Some("Budi"));
    assert_eq!(response.body.result.result_code.as_deref(), Some("SUCCESS"));

    let sent = &client.transport().sent()[0];
    assert_eq!(sent.headers[HEADER_CLIENT_ID], "2018122812174155679466");
    assert!(sent.headers.contains_key(HEADER_REQUEST_TIME));
    assert_eq!(envelope_of(sent), json!({ "accessToken": "at-123" }));
    merchant_verifier()
        .verify(&sent.body, sent.headers[HEADER_SIGNATURE].to_str().unwrap())
        .unwrap();
}

#[tokio::test]
async fn test_invalid_json_is_a_deserialization_error() {
    let client = client(MockTransport::new(|_| {
        Ok(WireResponse::ok("<html>maintenance</html>"))
    }));

    let err = client
        .query_user_profile(&UserProfileRequest { user_resources: vec![] }, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Deserialization {
            operation: "dana.member.query.queryUserProfile",
            ..
        }
    ));
}

#[tokio::test]
async fn test_unexpected_body_is_a_mapping_error() {
    let client = client(MockTransport::new(|request| {
        Ok(signed_response(
            request,
            json!({ "acquirementId": "20261019111212800110166" }),
        ))
    }));

    let err = client
        .create_order(&order_request("5000"), None)
        .await
        .unwrap_err();

    match err {
        Error::StructuralMapping { operation, source } => {
            assert_eq!(operation, "dana.acquiring.order.createOrder");
            assert!(source.to_string().contains("resultInfo"), "{source}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_client_is_usable_after_a_failure() {
    let calls = AtomicUsize::new(0);
    let client = client(MockTransport::new(move |request| {
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(WireResponse::new(StatusCode::BAD_GATEWAY, ""))
        } else {
            Ok(signed_response(request, json!({ "resultInfo": success() })))
        }
    }));
    let request = ApplyTokenRequest::authorization_code("ABC");

    assert!(client.apply_access_token(&request).await.unwrap_err().is_transport());
    let response = client.apply_access_token(&request).await.unwrap();
    assert_eq!(
        response.body.result_info.result_status.as_deref(),
        Some("S")
    );
}

#[tokio::test]
async fn test_concurrent_calls_use_unique_message_ids() {
    let client = client(MockTransport::new(|request| {
        Ok(signed_response(request, json!({ "resultInfo": success() })))
    }));
    let requests: Vec<_> = (0..16)
        .map(|i| ApplyTokenRequest::authorization_code(format!("code-{i}")))
        .collect();

    let responses = join_all(requests.iter().map(|r| client.apply_access_token(r))).await;

    let echoed: HashSet<_> = responses
        .into_iter()
        .map(|r| r.unwrap().head.unwrap().req_msg_id)
        .collect();
    assert_eq!(echoed.len(), 16);

    let sent: HashSet<_> = client
        .transport()
        .sent()
        .iter()
        .map(|r| envelope_of(r)["request"]["head"]["reqMsgId"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(sent, echoed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_client_serves_spawned_calls() {
    let client = Arc::new(client(MockTransport::new(|request| {
        Ok(signed_response(request, json!({ "resultInfo": success() })))
    })));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                let request = ApplyTokenRequest::authorization_code(format!("code-{i}"));
                client.apply_access_token(&request).await
            })
        })
        .collect();

    let mut echoed = HashSet::new();
    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response.verification, Verification::Verified);
        echoed.insert(response.head.unwrap().req_msg_id);
    }

    assert_eq!(echoed.len(), 8);
    assert_eq!(client.transport().sent().len(), 8);
}

#[tokio::test]
async fn test_sign_value_and_verify_request() {
    let client = client(MockTransport::new(|_| Err(TransportError::Timeout)));

    let value = json!({ "merchantId": "M", "amount": "100" });
    let signature = client.sign_value(&value).unwrap();
    merchant_verifier()
        .verify(&canonical_bytes(&value).unwrap(), &signature)
        .unwrap();

    let request = json!({ "head": { "function": "dana.acquiring.order.finishNotify" }, "body": {} });
    let gateway_signature = gateway_keys()
        .sign(&canonical_bytes(&request).unwrap())
        .unwrap();
    let raw = serde_json::to_vec(&json!({ "request": request, "signature": gateway_signature }))
        .unwrap();
    client.verify_request(&raw).unwrap();

    let forged = serde_json::to_vec(&json!({ "request": request, "signature": signature })).unwrap();
    assert!(matches!(
        client.verify_request(&forged),
        Err(SignatureError::Mismatch(_))
    ));
}
