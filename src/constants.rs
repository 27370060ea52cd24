/// Default root of the 3C Plus REST API
pub const DEFAULT_BASE_URL: &str = "http://app.3c.fluxoti.com.br/api/v1";
/// Default per-call timeout in seconds for authentication calls
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
/// Default per-call timeout in seconds for mailing calls, which carry larger payloads
pub const DEFAULT_MAILING_TIMEOUT_SECS: u64 = 20;
/// User agent string used in HTTP requests to identify this client to the 3C Plus API
pub const USER_AGENT: &str = "threec-client/0.1.0";
/// Maximum number of phone numbers the upload endpoint accepts per contact
pub const MAX_PHONES_PER_CONTACT: usize = 20;
/// Minimum number of digits for a phone number to be dialable (area code + number)
pub const MIN_PHONE_DIGITS: usize = 10;
/// Base delay in milliseconds for the opt-in exponential backoff
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;
/// Upper bound in milliseconds of the random jitter added to each backoff delay
pub const DEFAULT_RETRY_JITTER_MS: u64 = 100;

/// Environment variable holding the login email
pub const ENV_USER: &str = "THREEC_USER";
/// Environment variable holding the login password
pub const ENV_PASSWORD: &str = "THREEC_PASSWORD";
/// Environment variable holding the numeric company id
pub const ENV_COMPANY_ID: &str = "THREEC_COMPANY_ID";
/// Environment variable holding the company domain
pub const ENV_COMPANY_DOMAIN: &str = "THREEC_COMPANY_DOMAIN";
/// Environment variable overriding the API root
pub const ENV_BASE_URL: &str = "THREEC_BASE_URL";
/// Environment variable overriding the per-call timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "THREEC_TIMEOUT_SECS";
/// Environment variable holding a JSON object of endpoint overrides
pub const ENV_ENDPOINTS: &str = "THREEC_ENDPOINTS";
/// Environment variable enabling the opt-in retry policy
pub const ENV_MAX_RETRIES: &str = "THREEC_MAX_RETRIES";
/// Environment variable overriding the retry base delay in milliseconds
pub const ENV_RETRY_BASE_DELAY_MS: &str = "THREEC_RETRY_BASE_DELAY_MS";
