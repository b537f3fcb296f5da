//! 注册表单实体与校验规则
//!
//! 草稿只在表单存续期间存在，不做任何持久化。校验是纯函数：
//! 先检查必填，再检查格式，必填失败的字段不再追加格式提示。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// 必填字段的提示信息
pub const REQUIRED_MESSAGE: &str = "This field is required!";

const LOGIN_MESSAGE: &str = "Login must start from a letter (max 20 chars).";
const NICKNAME_MESSAGE: &str = "Nickname: 3-20 characters (letters, digits, -, _).";
const EMAIL_MESSAGE: &str = "Invalid email address!";
const PASSWORD_MESSAGE: &str =
    "Password: min. 8 characters, capital and small letter, digit and special character (no '.').";

/// 密码允许的特殊字符集合（注意 `.` 不在其中）
const PASSWORD_SYMBOLS: &str = "@$!%*?&";

static LOGIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z\d.-]{0,19}$").expect("login pattern"));
static NICKNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]{3,20}$").expect("nickname pattern"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$").expect("email pattern"));

/// 注册表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignupField {
    Login,
    Nickname,
    Email,
    Password,
}

impl SignupField {
    /// 表单字段的固定顺序
    pub const ALL: [SignupField; 4] = [
        SignupField::Login,
        SignupField::Nickname,
        SignupField::Email,
        SignupField::Password,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignupField::Login => "login",
            SignupField::Nickname => "nickname",
            SignupField::Email => "email",
            SignupField::Password => "password",
        }
    }
}

impl fmt::Display for SignupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 注册表单草稿
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationDraft {
    /// 登录名
    pub login: String,
    /// 昵称
    pub nickname: String,
    /// 邮箱
    pub email: String,
    /// 密码
    pub password: String,
}

impl RegistrationDraft {
    pub fn field(&self, field: SignupField) -> &str {
        match field {
            SignupField::Login => &self.login,
            SignupField::Nickname => &self.nickname,
            SignupField::Email => &self.email,
            SignupField::Password => &self.password,
        }
    }

    pub fn set_field(&mut self, field: SignupField, value: impl Into<String>) {
        let value = value.into();
        match field {
            SignupField::Login => self.login = value,
            SignupField::Nickname => self.nickname = value,
            SignupField::Email => self.email = value,
            SignupField::Password => self.password = value,
        }
    }

    /// 校验整个草稿，返回字段到提示信息的映射
    ///
    /// 空映射表示草稿可以提交。调用方约定：只有校验集为空时
    /// 才允许发起注册请求。
    pub fn validate(&self) -> ViolationSet {
        let mut violations = ViolationSet::default();
        for field in SignupField::ALL {
            let value = self.field(field);
            if value.is_empty() {
                violations.insert(field, REQUIRED_MESSAGE);
                continue;
            }
            if let Some(message) = format_violation(field, value) {
                violations.insert(field, message);
            }
        }
        violations
    }
}

/// 字段格式检查，通过时返回 `None`
fn format_violation(field: SignupField, value: &str) -> Option<&'static str> {
    let ok = match field {
        SignupField::Login => LOGIN_RE.is_match(value),
        SignupField::Nickname => NICKNAME_RE.is_match(value),
        SignupField::Email => EMAIL_RE.is_match(value),
        SignupField::Password => password_ok(value),
    };
    (!ok).then_some(match field {
        SignupField::Login => LOGIN_MESSAGE,
        SignupField::Nickname => NICKNAME_MESSAGE,
        SignupField::Email => EMAIL_MESSAGE,
        SignupField::Password => PASSWORD_MESSAGE,
    })
}

/// 密码强度检查
///
/// 至少8位，包含大小写字母、数字和指定特殊字符各一个，
/// 且只允许字母、数字与该特殊字符集合。
fn password_ok(password: &str) -> bool {
    if password.len() < 8 {
        return false;
    }

    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c));
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    allowed && has_lower && has_upper && has_digit && has_symbol
}

/// 字段到人类可读提示信息的映射
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationSet(BTreeMap<SignupField, &'static str>);

impl ViolationSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: SignupField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn insert(&mut self, field: SignupField, message: &'static str) {
        self.0.insert(field, message);
    }

    /// 清除单个字段的提示，不触碰其他字段
    pub fn clear(&mut self, field: SignupField) {
        self.0.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (SignupField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}
