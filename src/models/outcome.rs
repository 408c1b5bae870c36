use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 持久化协作者的三种返回 - 显式标签枚举
///
/// 写入调用只可能产生这三种结果之一: 成功 / 带原因的结构化失败 /
/// 无法识别的响应 (含传输层异常)。协作者实现负责把异常和未知
/// 响应形状统一归到 `Unknown`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WriteOutcome {
    /// 写入成功, 携带后端返回的原始结果
    Success(Value),
    /// 后端拒绝, 携带可读原因 (原样展示给用户)
    Failure(String),
    /// 响应形状不可识别或传输异常
    Unknown,
}

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Success,
    Error,
    Warning,
}
