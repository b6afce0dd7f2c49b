use crate::common::{animals_body, test_config, token_body};
use adopty_client::prelude::*;
use mockito::Matcher;

#[tokio::test]
async fn refreshed_token_is_persisted_encrypted() {
    let mut server = mockito::Server::new_async().await;
    let _rejected = server
        .mock("GET", "/animals")
        .match_query(Matcher::Any)
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .create_async()
        .await;
    let _exchange = server
        .mock("POST", "/oauth2/token")
        .with_status(200)
        .with_body(token_body("secret-bearer-value"))
        .create_async()
        .await;
    let _retried = server
        .mock("GET", "/animals")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer secret-bearer-value")
        .with_status(200)
        .with_body(animals_body(&[(1, "Ash")]))
        .create_async()
        .await;

    let (config, dir) = test_config(&server.url());
    let storage = config.storage.clone();
    let client = Client::new(Arc::new(HttpClient::new_lazy(config).unwrap()));

    let list = client.get_animals(&BreedFilter::All).await.unwrap();
    assert_eq!(list.len(), 1);

    let raw = std::fs::read_to_string(dir.path().join(TOKEN_FILE_NAME)).unwrap();
    assert!(!raw.contains("secret-bearer-value"));
    assert!(dir.path().join(MASTER_KEY_FILE_NAME).exists());

    let store = EncryptedTokenStore::open(&storage).unwrap();
    assert_eq!(
        store.get().unwrap().unwrap().access_token,
        "secret-bearer-value"
    );
}

#[test]
fn configured_master_key_is_used_instead_of_key_file() {
    let (mut config, dir) = test_config("http://localhost");
    config.storage.master_key = Some(hex::encode(TokenCipher::generate_key()));

    let store = EncryptedTokenStore::open(&config.storage).unwrap();
    store.save(&Token::new("t")).unwrap();

    assert!(!dir.path().join(MASTER_KEY_FILE_NAME).exists());
    let reopened = EncryptedTokenStore::open(&config.storage).unwrap();
    assert_eq!(reopened.get().unwrap().unwrap().access_token, "t");
}

#[test]
fn invalid_master_key_is_rejected() {
    let (mut config, _dir) = test_config("http://localhost");
    config.storage.master_key = Some("not-hex".to_string());

    assert!(matches!(
        EncryptedTokenStore::open(&config.storage),
        Err(AppError::Crypto(_))
    ));
}

#[tokio::test]
async fn corrupted_store_file_is_replaced_after_refresh() {
    let mut server = mockito::Server::new_async().await;
    let _rejected = server
        .mock("GET", "/animals")
        .match_query(Matcher::Any)
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .create_async()
        .await;
    let exchange = server
        .mock("POST", "/oauth2/token")
        .with_status(200)
        .with_body(token_body("recovered-token"))
        .expect(1)
        .create_async()
        .await;
    let _retried = server
        .mock("GET", "/animals")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer recovered-token")
        .with_status(200)
        .with_body(animals_body(&[(4, "Dot")]))
        .create_async()
        .await;

    let (config, dir) = test_config(&server.url());
    let storage = config.storage.clone();
    std::fs::write(dir.path().join(TOKEN_FILE_NAME), r#"{"entries": {"pet_au"#).unwrap();
    let client = Client::new(Arc::new(HttpClient::new_lazy(config).unwrap()));

    let list = client.get_animals(&BreedFilter::All).await.unwrap();
    assert_eq!(list.len(), 1);
    exchange.assert_async().await;

    let store = EncryptedTokenStore::open(&storage).unwrap();
    assert_eq!(
        store.get().unwrap().unwrap().access_token,
        "recovered-token"
    );
}

#[test]
fn corrupted_store_file_reads_as_empty_and_can_be_cleared() {
    let (config, dir) = test_config("http://localhost");
    std::fs::write(dir.path().join(TOKEN_FILE_NAME), "not json").unwrap();

    let store = EncryptedTokenStore::open(&config.storage).unwrap();
    assert_eq!(store.get().unwrap(), None);
    store.clear().unwrap();
    store.save(&Token::new("after-clear")).unwrap();
    assert_eq!(store.get().unwrap().unwrap().access_token, "after-clear");
}

#[test]
fn stores_sharing_a_directory_save_concurrently() {
    let (config, dir) = test_config("http://localhost");
    let storage = config.storage;
    let first = Arc::new(EncryptedTokenStore::open(&storage).unwrap());
    let second = Arc::new(EncryptedTokenStore::open(&storage).unwrap());

    let writers: Vec<_> = [("first", first), ("second", second.clone())]
        .into_iter()
        .map(|(name, store)| {
            std::thread::spawn(move || {
                for i in 0..50 {
                    store.save(&Token::new(format!("{name}-{i}"))).unwrap();
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    let last = second.get().unwrap().unwrap().access_token;
    assert!(last == "first-49" || last == "second-49");
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path() != dir.path().join(TOKEN_FILE_NAME))
        .filter(|entry| entry.path() != dir.path().join(MASTER_KEY_FILE_NAME))
        .collect();
    assert!(leftovers.is_empty());
}
