use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

/// Hash a password with Argon2id and a fresh salt (PHC string).
pub fn hash_password(plain: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

/// An unparseable stored hash counts as a mismatch.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_and_verifies() {
        let a = hash_password("pw123").unwrap();
        let b = hash_password("pw123").unwrap();

        assert_ne!(a, "pw123");
        assert!(!a.contains("pw123"));
        assert_ne!(a, b);
        assert!(verify_password(&a, "pw123"));
        assert!(verify_password(&b, "pw123"));
        assert!(!verify_password(&a, "pw124"));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_password("", ""));
        assert!(!verify_password("not-a-phc-string", "pw123"));
    }
}
