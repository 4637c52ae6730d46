//! 查询地址构造与响应解析
//!
//! 这里的函数不触碰网络：[`table_query_url`] 负责拼出 REST 查询地址，
//! [`Inspection::from_response`] 负责把状态码与响应体归类为检查结果。
//! 启用 `reqwest` 特性时，[`reqwest`] 子模块提供实际发起请求的检查器。
//!
//! # 示例
//!
//! ```rust
//! # use table_inspector::fetch::table_query_url;
//! let url = table_query_url("https://demo.supabase.co", "widgets", 5).unwrap();
//! assert_eq!(url.as_str(), "https://demo.supabase.co/rest/v1/widgets?select=*&limit=5");
//! ```

#[cfg(feature = "reqwest")]
pub mod reqwest;

use anyhow::{Result, anyhow};
use serde_json::Value;
use url::Url;

use crate::Inspection;

/// 构造 `<base>/rest/v1/<table>?select=*&limit=<limit>` 查询地址。
///
/// 基础地址末尾的 `/` 会被忽略；表名作为单个路径段追加，必要时被百分号编码。
/// 查询串原样写入，`*` 不做编码。
///
/// # 错误
///
/// - 基础地址无法解析为 URL
/// - 基础地址不能作为路径前缀（如 `mailto:`）
/// - 表名为空
pub fn table_query_url(base_url: &str, table: &str, limit: usize) -> Result<Url> {
    if table.is_empty() {
        return Err(anyhow!("Table name must not be empty"));
    }
    let mut url =
        Url::parse(base_url).map_err(|e| anyhow!("When parsing base url {base_url:?}: {e}"))?;
    url.path_segments_mut()
        .map_err(|()| anyhow!("Base url {base_url:?} cannot be a base"))?
        .pop_if_empty()
        .extend(["rest", "v1", table]);
    url.set_query(Some(&format!("select=*&limit={limit}")));
    Ok(url)
}

/// 每张表检查输出前的标题行。
#[must_use]
pub fn banner(table: &str) -> String {
    format!("--- Checking {table} ---")
}

impl Inspection {
    /// 将一次响应归类为检查结果。
    ///
    /// - 非 200：[`Inspection::HttpError`]，响应体原样保存；
    /// - 200 且为空数组：[`Inspection::Empty`]；
    /// - 200 且为非空数组：[`Inspection::Sample`]，字段名取自首个元素。
    ///
    /// # 错误
    ///
    /// 状态为 200 但响应体不是 JSON、根节点不是数组，或首个元素不是对象。
    pub fn from_response(status: u16, body: &str) -> Result<Self> {
        if status != 200 {
            return Ok(Self::HttpError {
                status,
                body: body.to_string(),
            });
        }
        let value: Value =
            serde_json::from_str(body).map_err(|e| anyhow!("When parsing response json: {e}"))?;
        let Value::Array(records) = value else {
            return Err(anyhow!("Response root is not an array"));
        };
        let count = records.len();
        let Some(first) = records.into_iter().next() else {
            return Ok(Self::Empty);
        };
        let keys = record_keys(&first)?;
        Ok(Self::Sample { count, keys, first })
    }
}

/// 记录的字段名，按文档顺序。
fn record_keys(record: &Value) -> Result<Vec<String>> {
    let obj = record
        .as_object()
        .ok_or_else(|| anyhow!("First record is not an object"))?;
    Ok(obj.keys().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_object_first_record_is_an_error() {
        assert!(record_keys(&Value::from(3)).is_err());
        assert!(Inspection::from_response(200, "[1]").is_err());
        assert!(Inspection::from_response(200, "[null]").is_err());
        assert!(Inspection::from_response(200, "[[1, 2], {}]").is_err());
    }

    #[test]
    fn trailing_slash_is_not_doubled() {
        let url = table_query_url("https://demo.supabase.co/", "widgets", 5).unwrap();
        assert_eq!(
            url.as_str(),
            "https://demo.supabase.co/rest/v1/widgets?select=*&limit=5"
        );
    }
}
