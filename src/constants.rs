/// User agent string used in HTTP requests to identify this client to the Petfinder API
pub const USER_AGENT: &str = "adopty-client/0.1.0";
/// Default base URL of the Petfinder REST API
pub const DEFAULT_BASE_URL: &str = "https://api.petfinder.com/v2";
/// Default timeout in seconds for REST requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Path of the OAuth2 token endpoint, relative to the base URL
pub const TOKEN_PATH: &str = "oauth2/token";
/// Path of the animal listing endpoint, relative to the base URL
pub const ANIMALS_PATH: &str = "animals";
/// Animal type every listing query is restricted to
pub const ANIMAL_TYPE: &str = "dog";
/// Grant type sent to the token endpoint
pub const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";
/// Default directory for locally persisted state
pub const DEFAULT_STORAGE_DIR: &str = ".adopty";
/// File holding the encrypted key-value entries
pub const TOKEN_FILE_NAME: &str = "pet_auth.json";
/// File holding the generated master key when none is configured
pub const MASTER_KEY_FILE_NAME: &str = "master.key";
/// Key of the bearer token entry in the encrypted store
pub const TOKEN_KEY: &str = "pet_auth_token";
/// Label of the breed filter sentinel that matches every breed
pub const ALL_BREEDS_LABEL: &str = "All";
/// Breed the home screen starts on
pub const DEFAULT_BREED: &str = "Affenpinscher";
/// Message shown to users for any failed query
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";
/// Breeds offered as filters, in display order. The sentinel comes first.
pub const KNOWN_BREEDS: &[&str] = &[
    ALL_BREEDS_LABEL,
    "Affenpinscher",
    "American Bulldog",
    "Anatolian Shepherd",
    "Bloodhound",
    "Beagle",
    "Blue Lacy",
    "Carolina Dog",
    "Golden Retriever",
    "Greyhound",
    "Great Dane",
    "Labrador Retriever",
    "Labradoodle",
    "Maltipoo",
    "Poodle",
    "Pug",
    "Pomeranian",
    "Pit Bull Terrier",
    "Shepherd",
    "Sheep Dog",
];
