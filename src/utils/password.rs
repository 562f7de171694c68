// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::utils::errors::DomainError;

/// 使用 Argon2id 计算密码哈希，返回 PHC 格式字符串
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::Validation(format!("failed to hash password: {e}")))
}

/// 校验密码与已存储的哈希是否匹配
pub fn verify_password(password: &str, hash: &str) -> Result<bool, DomainError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| DomainError::Unauthorized(format!("invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("campus-2026").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("campus-2026", &hash).unwrap());
        assert!(!verify_password("campus-2025", &hash).unwrap());
    }

    #[test]
    fn test_invalid_hash_format() {
        assert!(verify_password("password", "plain-text").is_err());
    }
}
