use super::*;
use crate::navigation::{LoginRedirect, RecordingNavigator};
use crate::request::{MOCK_BASE, MockHttpClient, json_response};
use crate::storage::MemoryStore;
use natakahii_admin_shared::UserProfile;
use serde_json::json;
use std::cell::Cell;

struct Harness {
    client: ApiClient,
    http: Rc<MockHttpClient>,
    nav: Rc<RecordingNavigator>,
    events: Rc<RefCell<Vec<AuthEvent>>>,
}

fn harness_at(path: &str) -> Harness {
    let config = ClientConfig {
        api_base_url: MOCK_BASE.to_string(),
        ..ClientConfig::default()
    };
    let http = Rc::new(MockHttpClient::new().with_latency());
    let storage = AuthStorage::new(Rc::new(MemoryStore::new()), &config);
    let client = ApiClient::new(config, http.clone(), storage);

    let nav = Rc::new(RecordingNavigator::at(path));
    let redirect = LoginRedirect::new(nav.clone(), client.config().login_route.clone());
    client.subscribe(move |event| redirect.handle(event));

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    client.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    Harness {
        client,
        http,
        nav,
        events,
    }
}

fn harness() -> Harness {
    harness_at("/app/admin/users")
}

fn sign_in(h: &Harness, token: &str) {
    h.client.storage().set_token(token);
    let user = UserProfile::from_payload(&json!({ "name": "Asha", "role": "super_admin" }));
    if let Some(user) = user {
        h.client.storage().set_user(&user);
    }
}

/// 只接受指定 token 的接口
fn accept_only(h: &Harness, path: &str, token: &'static str, body: serde_json::Value) {
    h.http.on(HttpMethod::Get, path, move |req| {
        if req.bearer() == Some(token) {
            Ok(json_response(200, &body))
        } else {
            Ok(json_response(401, &json!({ "message": "Unauthenticated." })))
        }
    });
}

#[tokio::test]
async fn test_attaches_bearer_from_storage_at_send_time() {
    let h = harness();
    h.http
        .reply(HttpMethod::Get, paths::ADMIN_USERS, 200, json!({ "data": [] }));

    h.client
        .get(paths::ADMIN_USERS, &QueryParams::new())
        .await
        .unwrap();
    sign_in(&h, "t1");
    h.client
        .get(paths::ADMIN_USERS, &QueryParams::new().with("search", "asha"))
        .await
        .unwrap();

    let sent = h.http.requests_to(paths::ADMIN_USERS);
    assert_eq!(sent[0].bearer(), None);
    assert_eq!(sent[1].bearer(), Some("t1"));
    assert_eq!(
        sent[1].url,
        format!("{}{}?search=asha", MOCK_BASE, paths::ADMIN_USERS)
    );
}

#[tokio::test]
async fn test_unauthorized_then_refresh_is_transparent() {
    let h = harness();
    sign_in(&h, "old");
    accept_only(&h, paths::ADMIN_ORDERS, "new", json!({ "data": [{ "id": 1 }] }));
    h.http
        .reply(HttpMethod::Post, paths::REFRESH, 200, json!({ "token": "new" }));

    let body = h
        .client
        .get(paths::ADMIN_ORDERS, &QueryParams::new())
        .await
        .unwrap();

    assert_eq!(body, json!({ "data": [{ "id": 1 }] }));
    assert_eq!(h.client.storage().token().as_deref(), Some("new"));
    assert!(h.client.storage().user().is_some());
    assert!(h.nav.visits.borrow().is_empty());
    assert_eq!(
        *h.events.borrow(),
        vec![AuthEvent::TokenRefreshed("new".into())]
    );

    let refresh = h.http.requests_to(paths::REFRESH);
    assert_eq!(refresh.len(), 1);
    assert_eq!(refresh[0].bearer(), Some("old"));
    assert_eq!(refresh[0].method, HttpMethod::Post);
    assert!(refresh[0].body.is_none());
}

#[tokio::test]
async fn test_refresh_accepts_access_token_field() {
    let h = harness();
    sign_in(&h, "old");
    accept_only(&h, paths::ADMIN_ORDERS, "fresh", json!([]));
    h.http.reply(
        HttpMethod::Post,
        paths::REFRESH,
        200,
        json!({ "access_token": "fresh" }),
    );

    h.client
        .get(paths::ADMIN_ORDERS, &QueryParams::new())
        .await
        .unwrap();
    assert_eq!(h.client.storage().token().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_refresh_rejected_expires_session() {
    let h = harness();
    sign_in(&h, "old");
    accept_only(&h, paths::ADMIN_ORDERS, "new", json!([]));
    h.http.reply(
        HttpMethod::Post,
        paths::REFRESH,
        401,
        json!({ "message": "Token has expired" }),
    );

    let err = h
        .client
        .get(paths::ADMIN_ORDERS, &QueryParams::new())
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.display_message(), "Token has expired");
    assert_eq!(h.client.storage().token(), None);
    assert_eq!(h.client.storage().user(), None);
    assert_eq!(*h.nav.visits.borrow(), vec!["/".to_string()]);
    assert_eq!(*h.events.borrow(), vec![AuthEvent::SessionExpired]);
}

#[tokio::test]
async fn test_refresh_without_token_is_malformed() {
    let h = harness();
    sign_in(&h, "old");
    accept_only(&h, paths::ADMIN_ORDERS, "new", json!([]));
    h.http
        .reply(HttpMethod::Post, paths::REFRESH, 200, json!({ "ok": true }));

    let err = h
        .client
        .get(paths::ADMIN_ORDERS, &QueryParams::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind, crate::error::ApiErrorKind::MalformedAuth);
    assert_eq!(err.display_message(), "No token returned from refresh.");
    assert_eq!(h.client.storage().token(), None);
    assert_eq!(*h.nav.visits.borrow(), vec!["/".to_string()]);
}

#[tokio::test]
async fn test_concurrent_unauthorized_share_one_refresh() {
    let h = harness();
    sign_in(&h, "old");
    accept_only(&h, paths::ADMIN_ORDERS, "new", json!({ "data": ["o"] }));
    accept_only(&h, paths::ADMIN_USERS, "new", json!({ "data": ["u"] }));
    accept_only(&h, paths::ADMIN_VENDORS, "new", json!({ "data": ["v"] }));
    h.http
        .reply(HttpMethod::Post, paths::REFRESH, 200, json!({ "token": "new" }));

    let none = QueryParams::new();
    let (orders, users, vendors) = tokio::join!(
        h.client.get(paths::ADMIN_ORDERS, &none),
        h.client.get(paths::ADMIN_USERS, &none),
        h.client.get(paths::ADMIN_VENDORS, &none),
    );

    assert_eq!(orders.unwrap(), json!({ "data": ["o"] }));
    assert_eq!(users.unwrap(), json!({ "data": ["u"] }));
    assert_eq!(vendors.unwrap(), json!({ "data": ["v"] }));
    assert_eq!(h.http.count(HttpMethod::Post, paths::REFRESH), 1);

    // 每个请求：一次原始发送 + 一次携带新 token 的重发
    for path in [paths::ADMIN_ORDERS, paths::ADMIN_USERS, paths::ADMIN_VENDORS] {
        let sent = h.http.requests_to(path);
        assert_eq!(sent.len(), 2, "{path}");
        assert_eq!(sent[1].bearer(), Some("new"), "{path}");
    }
}

#[tokio::test]
async fn test_concurrent_unauthorized_share_refresh_failure() {
    let h = harness();
    sign_in(&h, "old");
    accept_only(&h, paths::ADMIN_ORDERS, "new", json!([]));
    accept_only(&h, paths::ADMIN_USERS, "new", json!([]));
    h.http
        .reply(HttpMethod::Post, paths::REFRESH, 500, json!({ "message": "boom" }));

    let none = QueryParams::new();
    let (orders, users) = tokio::join!(
        h.client.get(paths::ADMIN_ORDERS, &none),
        h.client.get(paths::ADMIN_USERS, &none),
    );

    assert_eq!(orders.unwrap_err().display_message(), "boom");
    assert_eq!(users.unwrap_err().display_message(), "boom");
    assert_eq!(h.http.count(HttpMethod::Post, paths::REFRESH), 1);
    assert_eq!(*h.events.borrow(), vec![AuthEvent::SessionExpired]);
    assert_eq!(*h.nav.visits.borrow(), vec!["/".to_string()]);
}

#[tokio::test]
async fn test_refresh_slot_clears_after_settling() {
    let h = harness();
    sign_in(&h, "t0");

    // 每次刷新签发递增的 token；接口只接受存储中的当前 token（t0 除外）
    let issued = Rc::new(Cell::new(0));
    let counter = issued.clone();
    h.http.on(HttpMethod::Post, paths::REFRESH, move |_| {
        counter.set(counter.get() + 1);
        Ok(json_response(
            200,
            &json!({ "token": format!("t{}", counter.get()) }),
        ))
    });
    let current = h.client.storage().clone();
    h.http.on(HttpMethod::Get, paths::ADMIN_ORDERS, move |req| {
        let latest = current.token();
        let valid = latest.as_deref().filter(|t| *t != "t0");
        if valid.is_some() && req.bearer() == valid {
            Ok(json_response(200, &json!([])))
        } else {
            Ok(json_response(401, &json!({})))
        }
    });

    h.client
        .get(paths::ADMIN_ORDERS, &QueryParams::new())
        .await
        .unwrap();
    // 服务端让 t1 失效，再次 401 时应发起新的刷新
    h.client.storage().set_token("t0");
    h.client
        .get(paths::ADMIN_ORDERS, &QueryParams::new())
        .await
        .unwrap();

    assert_eq!(issued.get(), 2);
    assert_eq!(h.client.storage().token().as_deref(), Some("t2"));
}

#[tokio::test]
async fn test_login_unauthorized_never_refreshes() {
    let h = harness_at("/");
    h.http.reply(
        HttpMethod::Post,
        paths::LOGIN,
        401,
        json!({ "message": "Invalid credentials" }),
    );

    let login = natakahii_admin_shared::protocol::LoginRequest::new("a@b.co", "secret1", "web");
    let err = h.client.request(&login).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.display_message(), "Invalid credentials");
    assert_eq!(h.http.count(HttpMethod::Post, paths::REFRESH), 0);
    assert!(h.events.borrow().is_empty());
    assert!(h.nav.visits.borrow().is_empty());
}

#[tokio::test]
async fn test_reset_password_unauthorized_never_refreshes() {
    let h = harness_at("/login");
    h.client.storage().set_token("stale");
    h.http.reply(
        HttpMethod::Post,
        paths::RESET_PASSWORD,
        401,
        json!({ "message": "Invalid or expired OTP." }),
    );

    let reset = natakahii_admin_shared::protocol::ResetPasswordRequest {
        email: "a@b.co".into(),
        otp: "123456".into(),
        password: "new-secret".into(),
        password_confirmation: "new-secret".into(),
    };
    let err = h.client.request(&reset).await.unwrap_err();

    assert_eq!(err.display_message(), "Invalid or expired OTP.");
    assert_eq!(h.http.count(HttpMethod::Post, paths::REFRESH), 0);
    assert_eq!(h.client.storage().token().as_deref(), Some("stale"));
    assert!(h.events.borrow().is_empty());
}

#[tokio::test]
async fn test_retried_request_unauthorized_again_expires() {
    let h = harness();
    sign_in(&h, "old");
    h.http.reply(
        HttpMethod::Get,
        paths::ADMIN_ORDERS,
        401,
        json!({ "message": "Unauthenticated." }),
    );
    h.http
        .reply(HttpMethod::Post, paths::REFRESH, 200, json!({ "token": "new" }));

    let err = h
        .client
        .get(paths::ADMIN_ORDERS, &QueryParams::new())
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(h.http.count(HttpMethod::Get, paths::ADMIN_ORDERS), 2);
    assert_eq!(h.http.count(HttpMethod::Post, paths::REFRESH), 1);
    assert_eq!(h.client.storage().token(), None);
    assert_eq!(*h.nav.visits.borrow(), vec!["/".to_string()]);
}

#[tokio::test]
async fn test_unauthorized_without_token_expires_without_refresh() {
    let h = harness();
    h.http
        .reply(HttpMethod::Get, paths::ADMIN_ORDERS, 401, json!({}));

    let err = h
        .client
        .get(paths::ADMIN_ORDERS, &QueryParams::new())
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(h.http.count(HttpMethod::Post, paths::REFRESH), 0);
    assert_eq!(*h.events.borrow(), vec![AuthEvent::SessionExpired]);
}

#[tokio::test]
async fn test_expiry_on_login_route_does_not_navigate() {
    let h = harness_at("/");
    sign_in(&h, "old");
    h.http
        .reply(HttpMethod::Get, paths::ME, 401, json!({}));
    h.http
        .reply(HttpMethod::Post, paths::REFRESH, 401, json!({}));

    let _ = h.client.get(paths::ME, &QueryParams::new()).await;

    assert_eq!(h.client.storage().token(), None);
    assert!(h.nav.visits.borrow().is_empty());
}

#[tokio::test]
async fn test_transient_errors_leave_auth_untouched() {
    let h = harness();
    sign_in(&h, "keep");
    h.http.reply(
        HttpMethod::Get,
        paths::ADMIN_ORDERS,
        500,
        json!({ "message": "Server Error" }),
    );
    h.http.on(HttpMethod::Get, paths::ADMIN_USERS, |_| {
        Err(ApiError::network("connection reset"))
    });

    let server = h
        .client
        .get(paths::ADMIN_ORDERS, &QueryParams::new())
        .await
        .unwrap_err();
    let network = h
        .client
        .get(paths::ADMIN_USERS, &QueryParams::new())
        .await
        .unwrap_err();

    assert_eq!(server.status, Some(500));
    assert_eq!(server.display_message(), "Server Error");
    assert_eq!(network.kind, crate::error::ApiErrorKind::Network);
    assert_eq!(h.client.storage().token().as_deref(), Some("keep"));
    assert!(h.events.borrow().is_empty());
}

#[tokio::test]
async fn test_request_sends_typed_body() {
    let h = harness();
    sign_in(&h, "t");
    h.http.on(HttpMethod::Patch, paths::PROFILE, |req| {
        let body: serde_json::Value =
            serde_json::from_str(req.body.as_deref().unwrap_or("null")).unwrap();
        Ok(json_response(200, &json!({ "echo": body })))
    });

    let update = natakahii_admin_shared::protocol::UpdateProfileRequest {
        name: Some("Asha M".into()),
        ..Default::default()
    };
    let echoed = h.client.request(&update).await.unwrap();
    assert_eq!(echoed, json!({ "echo": { "name": "Asha M" } }));
}

#[tokio::test]
async fn test_unauthorized_after_concurrent_refresh_reuses_new_token() {
    let h = harness();
    sign_in(&h, "old");
    // 请求在途期间，另一个请求已完成刷新
    let storage = h.client.storage().clone();
    h.http.on(HttpMethod::Get, paths::ADMIN_ORDERS, move |req| {
        if req.bearer() == Some("new") {
            return Ok(json_response(200, &json!([])));
        }
        storage.set_token("new");
        Ok(json_response(401, &json!({})))
    });

    h.client
        .get(paths::ADMIN_ORDERS, &QueryParams::new())
        .await
        .unwrap();

    assert_eq!(h.http.count(HttpMethod::Post, paths::REFRESH), 0);
    assert_eq!(h.http.count(HttpMethod::Get, paths::ADMIN_ORDERS), 2);
}
