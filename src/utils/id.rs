/// Generates a value for the `Idempotency-Key` header.
///
/// 30 characters drawn from `A-Z0-9` using `nanoid`; a fresh key is used for
/// every POST/PUT so the server can discard accidental duplicates.
///
/// # Examples
/// ```
/// use threec_client::utils::id::idempotency_key;
/// let key = idempotency_key();
/// assert_eq!(key.len(), 30);
/// ```
#[must_use]
pub fn idempotency_key() -> String {
    let alphabet: Vec<char> = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".chars().collect();
    nanoid::nanoid!(30, &alphabet)
}
