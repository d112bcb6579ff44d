use super::*;
use crate::config::ClientConfig;
use crate::request::{MOCK_BASE, MockHttpClient, json_response};
use crate::storage::{AuthStorage, MemoryStore};
use natakahii_admin_shared::{HttpMethod, paths};
use serde_json::json;

fn setup() -> (Session, Rc<MockHttpClient>) {
    let config = ClientConfig {
        api_base_url: MOCK_BASE.to_string(),
        ..ClientConfig::default()
    };
    let http = Rc::new(MockHttpClient::new());
    let storage = AuthStorage::new(Rc::new(MemoryStore::new()), &config);
    let client = ApiClient::new(config, http.clone(), storage);
    (Session::new(client), http)
}

fn me_payload() -> serde_json::Value {
    json!({ "data": { "user": { "id": 7, "name": "Asha", "admin_role": "Super Admin" } } })
}

#[tokio::test]
async fn test_bootstrap_without_token() {
    let (session, http) = setup();
    assert!(session.state().loading);

    session.bootstrap().await;

    let state = session.state();
    assert!(!state.loading);
    assert!(!state.is_authenticated);
    assert!(http.requests.borrow().is_empty());
}

#[tokio::test]
async fn test_bootstrap_restores_session() {
    let (session, http) = setup();
    session.client().storage().set_token("t");
    http.reply(HttpMethod::Get, paths::ME, 200, me_payload());

    session.bootstrap().await;

    let state = session.state();
    assert!(!state.loading);
    assert!(state.is_authenticated);
    assert_eq!(state.token.as_deref(), Some("t"));
    assert_eq!(state.role(), Some(Role::SuperAdmin));
    assert_eq!(
        session.client().storage().user().and_then(|u| u.name),
        Some("Asha".to_string())
    );
}

#[tokio::test]
async fn test_stored_token_is_not_signed_in_until_verified() {
    let (session, http) = setup();
    session.client().storage().set_token("t");
    let session = Session::new(session.client().clone());
    assert!(session.state().is_authenticated);
    assert!(!session.state().is_signed_in());

    http.reply(HttpMethod::Get, paths::ME, 200, me_payload());
    session.bootstrap().await;

    assert!(session.state().is_signed_in());
}

#[tokio::test]
async fn test_bootstrap_failure_clears_storage() {
    let (session, http) = setup();
    session.client().storage().set_token("t");
    http.reply(HttpMethod::Get, paths::ME, 500, json!({ "message": "down" }));

    session.bootstrap().await;

    let state = session.state();
    assert!(!state.loading);
    assert!(!state.is_authenticated);
    assert_eq!(state.token, None);
    assert_eq!(session.client().storage().token(), None);
}

#[tokio::test]
async fn test_login_uses_profile_from_me() {
    let (session, http) = setup();
    http.reply(
        HttpMethod::Post,
        paths::LOGIN,
        200,
        json!({ "token": "t1", "user": { "name": "Stale", "role": "customer" } }),
    );
    http.reply(HttpMethod::Get, paths::ME, 200, me_payload());

    let user = session
        .login(&Credentials {
            identifier: "  asha@natakahii.com ".into(),
            password: "secret1".into(),
            device_name: None,
        })
        .await
        .unwrap();

    assert_eq!(user.name.as_deref(), Some("Asha"));
    let state = session.state();
    assert!(state.is_authenticated);
    assert_eq!(state.token.as_deref(), Some("t1"));
    assert_eq!(state.role(), Some(Role::SuperAdmin));

    let login = &http.requests_to(paths::LOGIN)[0];
    let body: serde_json::Value =
        serde_json::from_str(login.body.as_deref().unwrap_or("null")).unwrap();
    assert_eq!(body["email"], "asha@natakahii.com");
    assert_eq!(body["email_or_phone"], "asha@natakahii.com");
    assert_eq!(body["device_name"], "natakahii-admin-web");

    let me = &http.requests_to(paths::ME)[0];
    assert_eq!(me.bearer(), Some("t1"));
}

#[tokio::test]
async fn test_login_without_token_fails() {
    let (session, http) = setup();
    http.reply(HttpMethod::Post, paths::LOGIN, 200, json!({ "message": "ok" }));

    let err = session
        .login(&Credentials {
            identifier: "asha@natakahii.com".into(),
            password: "secret1".into(),
            device_name: Some("tablet".into()),
        })
        .await
        .unwrap_err();

    assert_eq!(err.display_message(), "No token returned from server.");
    assert!(!session.state().is_authenticated);
    assert_eq!(http.count(HttpMethod::Get, paths::ME), 0);
}

#[tokio::test]
async fn test_login_rolls_back_when_profile_fails() {
    let (session, http) = setup();
    http.reply(HttpMethod::Post, paths::LOGIN, 200, json!({ "access_token": "t1" }));
    http.reply(HttpMethod::Get, paths::ME, 500, json!({}));

    assert!(session.login(&Credentials::default()).await.is_err());
    assert_eq!(session.client().storage().token(), None);
    assert_eq!(session.state(), SessionState::default());
}

#[tokio::test]
async fn test_logout_clears_even_when_backend_fails() {
    let (session, http) = setup();
    session.client().storage().set_token("t");
    http.reply(HttpMethod::Get, paths::ME, 200, me_payload());
    http.on(HttpMethod::Post, paths::LOGOUT, |_| {
        Err(crate::error::ApiError::network("offline"))
    });
    session.bootstrap().await;

    session.logout().await;

    assert_eq!(http.count(HttpMethod::Post, paths::LOGOUT), 1);
    assert_eq!(session.client().storage().token(), None);
    assert_eq!(session.client().storage().user(), None);
    assert!(!session.state().is_authenticated);
}

#[tokio::test]
async fn test_refresh_profile_updates_state() {
    let (session, http) = setup();
    session.client().storage().set_token("t");
    http.reply(HttpMethod::Get, paths::ME, 200, me_payload());
    session.bootstrap().await;

    http.reply(
        HttpMethod::Get,
        paths::ME,
        200,
        json!({ "user": { "name": "Asha M", "role": "admin" } }),
    );
    let user = session.refresh_profile().await.unwrap();

    assert_eq!(user.name.as_deref(), Some("Asha M"));
    assert_eq!(session.role(), Some(Role::NormalAdmin));
}

#[tokio::test]
async fn test_update_profile_patches_then_refetches() {
    let (session, http) = setup();
    session.client().storage().set_token("t");
    http.reply(HttpMethod::Patch, paths::PROFILE, 200, json!({ "message": "saved" }));
    http.reply(HttpMethod::Get, paths::ME, 200, json!({ "name": "New Name" }));

    let changes = UpdateProfileRequest {
        name: Some("New Name".into()),
        ..Default::default()
    };
    let user = session.update_profile(&changes).await.unwrap();

    assert_eq!(user.name.as_deref(), Some("New Name"));
    assert_eq!(http.count(HttpMethod::Patch, paths::PROFILE), 1);
}

#[tokio::test]
async fn test_remove_photo_deletes_then_refetches() {
    let (session, http) = setup();
    session.client().storage().set_token("t");
    http.reply(HttpMethod::Delete, paths::PROFILE_PHOTO, 200, json!({ "message": "removed" }));
    http.reply(
        HttpMethod::Get,
        paths::ME,
        200,
        json!({ "user": { "name": "Asha", "profile_photo": null } }),
    );

    let user = session.remove_photo().await.unwrap();

    assert_eq!(user.profile_photo, None);
    assert_eq!(http.count(HttpMethod::Delete, paths::PROFILE_PHOTO), 1);
    assert_eq!(http.count(HttpMethod::Get, paths::ME), 1);
    assert_eq!(session.state().user, Some(user));
}

#[tokio::test]
async fn test_password_reset_flow_keeps_session_signed_out() {
    let (session, http) = setup();
    session.bootstrap().await;
    http.reply(
        HttpMethod::Post,
        paths::FORGOT_PASSWORD,
        200,
        json!({ "message": "OTP sent." }),
    );
    http.reply(HttpMethod::Post, paths::RESEND_OTP, 200, json!({}));
    http.reply(
        HttpMethod::Post,
        paths::RESET_PASSWORD,
        200,
        json!({ "message": "Password updated." }),
    );

    let sent = session.request_password_reset(" asha@example.com ").await.unwrap();
    let resent = session.resend_reset_otp("asha@example.com").await.unwrap();
    let reset = session
        .reset_password(&ResetPasswordRequest {
            email: "asha@example.com".into(),
            otp: "123456".into(),
            password: "new-secret".into(),
            password_confirmation: "new-secret".into(),
        })
        .await
        .unwrap();

    assert_eq!(sent.as_deref(), Some("OTP sent."));
    assert_eq!(resent, None);
    assert_eq!(reset.as_deref(), Some("Password updated."));

    let forgot = &http.requests_to(paths::FORGOT_PASSWORD)[0];
    let body: serde_json::Value = serde_json::from_str(forgot.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "email": "asha@example.com" }));
    assert!(!session.state().is_authenticated);
    assert_eq!(session.client().storage().token(), None);
}

#[tokio::test]
async fn test_session_expiry_resets_state_and_notifies() {
    let (session, http) = setup();
    session.client().storage().set_token("t");
    http.reply(HttpMethod::Get, paths::ME, 200, me_payload());
    session.bootstrap().await;

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    session.subscribe(move |state| sink.borrow_mut().push(state.is_authenticated));

    http.reply(HttpMethod::Get, paths::ADMIN_USERS, 401, json!({}));
    http.reply(HttpMethod::Post, paths::REFRESH, 401, json!({}));
    let _ = session
        .client()
        .get(paths::ADMIN_USERS, &Default::default())
        .await;

    let state = session.state();
    assert!(!state.is_authenticated);
    assert_eq!(state.user, None);
    assert!(!state.loading);
    assert_eq!(*seen.borrow(), vec![false]);
}

#[tokio::test]
async fn test_token_refresh_updates_state() {
    let (session, http) = setup();
    session.client().storage().set_token("old");
    http.reply(HttpMethod::Get, paths::ME, 200, me_payload());
    session.bootstrap().await;

    http.on(HttpMethod::Get, paths::ADMIN_USERS, |req| {
        let status = if req.bearer() == Some("new") { 200 } else { 401 };
        Ok(json_response(status, &json!([])))
    });
    http.reply(HttpMethod::Post, paths::REFRESH, 200, json!({ "token": "new" }));
    session
        .client()
        .get(paths::ADMIN_USERS, &Default::default())
        .await
        .unwrap();

    assert_eq!(session.state().token.as_deref(), Some("new"));
    assert!(session.state().is_authenticated);
}
