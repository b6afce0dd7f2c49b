use crate::common::{animals_body, test_config, token_body};
use adopty_client::prelude::*;
use mockito::Matcher;

fn http_client(config: Config, store: Arc<dyn TokenStore>) -> HttpClient {
    HttpClient::with_store(config, store).expect("Failed to build client")
}

#[tokio::test]
async fn unauthorized_triggers_one_exchange_and_one_retry() {
    let mut server = mockito::Server::new_async().await;
    let rejected = server
        .mock("GET", "/animals")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer stale-token")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let exchange = server
        .mock("POST", "/oauth2/token")
        .with_status(200)
        .with_body(token_body("fresh-token"))
        .expect(1)
        .create_async()
        .await;
    let retried = server
        .mock("GET", "/animals")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer fresh-token")
        .with_status(200)
        .with_body(animals_body(&[(1, "Ash"), (2, "Bo")]))
        .expect(1)
        .create_async()
        .await;

    let (config, _dir) = test_config(&server.url());
    let store = Arc::new(MemoryTokenStore::with_token(Token::new("stale-token")));
    let client = http_client(config, store.clone());

    let list: AnimalList = client.get("animals", &[("type", "dog")]).await.unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(store.get().unwrap().unwrap().access_token, "fresh-token");
    rejected.assert_async().await;
    exchange.assert_async().await;
    retried.assert_async().await;
}

#[tokio::test]
async fn missing_token_is_obtained_on_first_rejection() {
    let mut server = mockito::Server::new_async().await;
    let rejected = server
        .mock("GET", "/animals")
        .match_query(Matcher::Any)
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let exchange = server
        .mock("POST", "/oauth2/token")
        .with_status(200)
        .with_body(token_body("first-token"))
        .expect(1)
        .create_async()
        .await;
    let retried = server
        .mock("GET", "/animals")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer first-token")
        .with_status(200)
        .with_body(animals_body(&[]))
        .expect(1)
        .create_async()
        .await;

    let (config, _dir) = test_config(&server.url());
    let client = http_client(config, Arc::new(MemoryTokenStore::new()));

    let list: AnimalList = client.get("animals", &[]).await.unwrap();

    assert!(list.is_empty());
    rejected.assert_async().await;
    exchange.assert_async().await;
    retried.assert_async().await;
}

#[tokio::test]
async fn failed_exchange_returns_original_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    let rejected = server
        .mock("GET", "/animals")
        .match_query(Matcher::Any)
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let exchange = server
        .mock("POST", "/oauth2/token")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let (config, _dir) = test_config(&server.url());
    let store = Arc::new(MemoryTokenStore::with_token(Token::new("stale-token")));
    let client = http_client(config, store.clone());

    let result: Result<AnimalList, AppError> = client.get("animals", &[]).await;

    assert!(matches!(result, Err(AppError::Unauthorized)));
    assert_eq!(store.get().unwrap().unwrap().access_token, "stale-token");
    rejected.assert_async().await;
    exchange.assert_async().await;
}

#[tokio::test]
async fn second_rejection_is_not_retried_again() {
    let mut server = mockito::Server::new_async().await;
    let rejected = server
        .mock("GET", "/animals")
        .match_query(Matcher::Any)
        .with_status(401)
        .expect(2)
        .create_async()
        .await;
    let exchange = server
        .mock("POST", "/oauth2/token")
        .with_status(200)
        .with_body(token_body("also-rejected"))
        .expect(1)
        .create_async()
        .await;

    let (config, _dir) = test_config(&server.url());
    let client = http_client(config, Arc::new(MemoryTokenStore::new()));

    let result: Result<AnimalList, AppError> = client.get("animals", &[]).await;

    assert!(matches!(result, Err(AppError::Unauthorized)));
    rejected.assert_async().await;
    exchange.assert_async().await;
}

#[tokio::test]
async fn other_statuses_are_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let failing = server
        .mock("GET", "/animals")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(1)
        .create_async()
        .await;
    let exchange = server
        .mock("POST", "/oauth2/token")
        .expect(0)
        .create_async()
        .await;
    let missing = server
        .mock("GET", "/animals/42")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let (config, _dir) = test_config(&server.url());
    let client = http_client(config, Arc::new(MemoryTokenStore::new()));

    let result: Result<AnimalList, AppError> = client.get("animals", &[]).await;
    assert!(matches!(result, Err(AppError::Unexpected(status)) if status == 503));

    let result: Result<Animal, AppError> = client.get("/animals/42", &[]).await;
    assert!(matches!(result, Err(AppError::NotFound)));

    failing.assert_async().await;
    exchange.assert_async().await;
    missing.assert_async().await;
}

#[tokio::test]
async fn eager_client_obtains_and_persists_token() {
    let mut server = mockito::Server::new_async().await;
    let exchange = server
        .mock("POST", "/oauth2/token")
        .with_status(200)
        .with_body(token_body("persisted-token"))
        .expect(1)
        .create_async()
        .await;

    let (config, dir) = test_config(&server.url());
    let storage = config.storage.clone();

    let client = HttpClient::new(config.clone()).await.unwrap();
    assert_eq!(
        client.auth().current_token().unwrap().access_token,
        "persisted-token"
    );

    // A second client over the same directory reuses the stored token
    let again = HttpClient::new(config).await.unwrap();
    assert_eq!(
        again.auth().current_token().unwrap().access_token,
        "persisted-token"
    );

    let reopened = EncryptedTokenStore::open(&storage).unwrap();
    assert_eq!(reopened.get().unwrap().unwrap().access_token, "persisted-token");
    exchange.assert_async().await;
    drop(dir);
}

#[tokio::test]
async fn concurrent_rejections_each_run_their_own_exchange() {
    let mut server = mockito::Server::new_async().await;
    let rejected = server
        .mock("GET", "/animals")
        .match_query(Matcher::Any)
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .expect(2)
        .create_async()
        .await;
    let exchange = server
        .mock("POST", "/oauth2/token")
        .with_status(200)
        .with_body(token_body("shared-token"))
        .expect(2)
        .create_async()
        .await;
    let retried = server
        .mock("GET", "/animals")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer shared-token")
        .with_status(200)
        .with_body(animals_body(&[(1, "Ash")]))
        .expect(2)
        .create_async()
        .await;

    let (config, _dir) = test_config(&server.url());
    let client = http_client(config, Arc::new(MemoryTokenStore::new()));

    let (first, second) = tokio::join!(
        client.get::<AnimalList>("animals", &[("type", "dog")]),
        client.get::<AnimalList>("animals", &[("type", "dog"), ("breed", "Pug")]),
    );

    assert_eq!(first.unwrap().len(), 1);
    assert_eq!(second.unwrap().len(), 1);
    rejected.assert_async().await;
    exchange.assert_async().await;
    retried.assert_async().await;
}
