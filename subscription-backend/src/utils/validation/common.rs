// src/utils/validation/common.rs

//! 共通バリデーション定数
//!
//! DTO の derive バリデーションから参照するルールをまとめる。

use validator::ValidationError;

// =============================================================================
// バリデーション定数
// =============================================================================

/// サブスクリプション関連の制約
pub mod subscription {
    pub const SERVICE_NAME_MAX_LENGTH: u64 = 255;
}

// =============================================================================
// カスタムバリデーション関数
// =============================================================================

/// 文字列が空白のみでないかをチェック
pub fn validate_not_empty_or_whitespace(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("empty_or_whitespace");
        error.message = Some("Field cannot be empty or contain only whitespace".into());
        return Err(error);
    }
    Ok(())
}

/// サービス名のバリデーション
pub fn validate_service_name(name: &str) -> Result<(), ValidationError> {
    validate_not_empty_or_whitespace(name)?;

    if name.chars().any(char::is_control) {
        let mut error = ValidationError::new("invalid_characters");
        error.message = Some("Service name cannot contain control characters".into());
        return Err(error);
    }

    Ok(())
}
