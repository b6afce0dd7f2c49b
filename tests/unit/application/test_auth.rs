use crate::common::{test_config, token_body};
use adopty_client::prelude::*;
use mockito::Matcher;

fn auth_with(config: Config, store: Arc<dyn TokenStore>) -> Auth {
    Auth::new(Arc::new(config), store).expect("Failed to build auth")
}

#[tokio::test]
async fn authorize_without_token_sends_no_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/ping")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let (config, _dir) = test_config(&server.url());
    let auth = auth_with(config, Arc::new(MemoryTokenStore::new()));

    let request = reqwest::Client::new().get(format!("{}/ping", server.url()));
    let response = auth.authorize(request).send().await.unwrap();

    assert_eq!(response.status(), 200);
    mock.assert_async().await;
}

#[tokio::test]
async fn authorize_with_token_sends_bearer_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/ping")
        .match_header("authorization", "Bearer stored-token")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let (config, _dir) = test_config(&server.url());
    let store = Arc::new(MemoryTokenStore::with_token(Token::new("stored-token")));
    let auth = auth_with(config, store);

    let request = reqwest::Client::new().get(format!("{}/ping", server.url()));
    auth.authorize(request).send().await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn refresh_token_posts_client_credentials_and_persists() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/oauth2/token")
        .match_body(Matcher::PartialJsonString(
            r#"{"grant_type":"client_credentials","client_id":"test-client-id","client_secret":"test-client-secret"}"#
                .to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(token_body("fresh-token"))
        .expect(1)
        .create_async()
        .await;

    let (config, _dir) = test_config(&server.url());
    let store = Arc::new(MemoryTokenStore::new());
    let auth = auth_with(config, store.clone());

    let token = auth.refresh_token().await.unwrap();

    assert_eq!(token.access_token, "fresh-token");
    assert_eq!(token.expires_in, Some(3600));
    assert_eq!(store.get().unwrap().unwrap().access_token, "fresh-token");
    mock.assert_async().await;
}

#[tokio::test]
async fn failed_refresh_leaves_store_untouched() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/oauth2/token")
        .with_status(401)
        .with_body(r#"{"title":"invalid_client"}"#)
        .expect(1)
        .create_async()
        .await;

    let (config, _dir) = test_config(&server.url());
    let store = Arc::new(MemoryTokenStore::with_token(Token::new("old-token")));
    let auth = auth_with(config, store.clone());

    let result = auth.refresh_token().await;

    assert!(matches!(result, Err(AppError::TokenExchange(status)) if status == 401));
    assert_eq!(store.get().unwrap().unwrap().access_token, "old-token");
    mock.assert_async().await;
}

#[tokio::test]
async fn refresh_with_malformed_body_fails() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/oauth2/token")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let (config, _dir) = test_config(&server.url());
    let store = Arc::new(MemoryTokenStore::new());
    let auth = auth_with(config, store.clone());

    assert!(auth.refresh_token().await.is_err());
    assert!(store.get().unwrap().is_none());
}

#[tokio::test]
async fn login_reuses_stored_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/oauth2/token")
        .expect(0)
        .create_async()
        .await;

    let (config, _dir) = test_config(&server.url());
    let store = Arc::new(MemoryTokenStore::with_token(Token::new("kept")));
    let auth = auth_with(config, store);

    let token = auth.login().await.unwrap();

    assert_eq!(token.access_token, "kept");
    mock.assert_async().await;
}

#[tokio::test]
async fn login_without_token_exchanges_credentials() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/oauth2/token")
        .with_status(200)
        .with_body(token_body("first-token"))
        .expect(1)
        .create_async()
        .await;

    let (config, _dir) = test_config(&server.url());
    let auth = auth_with(config, Arc::new(MemoryTokenStore::new()));

    assert_eq!(auth.login().await.unwrap().access_token, "first-token");
    assert_eq!(auth.current_token().unwrap().access_token, "first-token");

    auth.logout().unwrap();
    assert!(auth.current_token().is_none());
    mock.assert_async().await;
}
