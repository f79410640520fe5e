//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that drives retry decisions.

use serde::Serialize;

/// エラー種別の列挙体
///
/// 上流 API とのやり取りで発生するエラーを、リトライ可否の観点で分類します。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::TransientUpstream;
/// assert!(kind.is_retryable());
/// assert_eq!(kind.as_str(), "Transient Upstream Error");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 設定不備: 認証 Cookie にデバイス識別子が無いなど。リトライしても回復しない
    Configuration,
    /// 一時的な上流エラー: 非ゼロの応答コード、ネットワーク障害、タイムアウト
    TransientUpstream,
    /// プロトコル不整合: 応答に必要なフィールドが欠けている
    ProtocolDesync,
}

impl ErrorKind {
    /// ユーザー向けの文字列表現を取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::Configuration.as_str(), "Configuration Error");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "Configuration Error",
            ErrorKind::TransientUpstream => "Transient Upstream Error",
            ErrorKind::ProtocolDesync => "Protocol Desync Error",
        }
    }

    /// リトライ可能かどうかを判定
    ///
    /// 不正な応答は一時的な障害と区別できないため、
    /// `ProtocolDesync` も `TransientUpstream` と同様に扱います。
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        match self {
            ErrorKind::Configuration => false,
            ErrorKind::TransientUpstream | ErrorKind::ProtocolDesync => true,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
