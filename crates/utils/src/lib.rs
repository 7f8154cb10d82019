use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Creates a random alphanumeric secret of the given length
pub fn create_random_secret(secret_len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}

/// Hashes `password` with Argon2id and a random salt into a PHC string
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt_bytes: [u8; 16] = thread_rng().gen();
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| anyhow::anyhow!("Unable to encode password salt: {}", e))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Unable to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Whether `password` matches the PHC string `password_hash`. A malformed
/// hash never matches.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_creates_secrets_of_requested_length() {
        assert_eq!(create_random_secret(16).len(), 16);
        assert_eq!(create_random_secret(0).len(), 0);
        assert!(create_random_secret(32).chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn it_verifies_hashed_passwords() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
        assert_ne!(hash, hash_password("correct horse").unwrap());
    }

    #[test]
    fn it_rejects_malformed_hashes() {
        assert!(!verify_password("", ""));
        assert!(!verify_password("password", "not a hash"));
    }
}
