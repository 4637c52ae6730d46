//! 基于 `reqwest` 的表检查器
//!
//! 每次检查只发起一次 GET 请求，不重试、不设超时，也不做限流。
//! 单张表的失败不会影响后续表的检查：[`Inspector::inspect_table`]
//! 把所有传输或解析错误收敛为 [`Inspection::Fault`]。
//!
//! # 示例
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! use table_inspector::Credentials;
//! use table_inspector::fetch::reqwest::Inspector;
//!
//! let inspector = Inspector::new(Credentials::from_env())?;
//! let inspection = inspector.inspect_table("finished_goods").await;
//! println!("{inspection}");
//! # Ok(())
//! # }
//! ```
#![cfg(feature = "reqwest")]

use anyhow::{Context, Result, anyhow};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use crate::fetch::{banner, table_query_url};
use crate::{Credentials, DEFAULT_LIMIT, Inspection};

/// 持有 HTTP 客户端与凭据的表检查器。
#[derive(Debug, Clone)]
pub struct Inspector {
    /// 复用的 HTTP 客户端
    client: reqwest::Client,
    /// 服务地址与 key
    credentials: Credentials,
}

impl Inspector {
    /// 使用默认配置的客户端创建检查器。
    ///
    /// # 错误
    ///
    /// 客户端构建失败（如 TLS 后端初始化失败）。
    pub fn new(credentials: Credentials) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("table-inspector/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow!("When building client: {e}"))?;
        Ok(Self::with_client(client, credentials))
    }

    /// 使用外部提供的客户端创建检查器。
    #[must_use]
    pub const fn with_client(client: reqwest::Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// 查询一张表并归类结果。
    ///
    /// 非 200 响应不视为错误，而是返回 [`Inspection::HttpError`]。
    ///
    /// # 错误
    ///
    /// - 查询地址无法构造
    /// - 网络请求失败（连接被拒、DNS 失败等）
    /// - 响应体无法读取，或 200 响应不是由对象组成的 JSON 数组
    pub async fn query_table(&self, table: &str) -> Result<Inspection> {
        let url = table_query_url(&self.credentials.base_url, table, DEFAULT_LIMIT)?;
        debug!(%url, "querying table");
        let key = &self.credentials.api_key;
        let response = self
            .client
            .get(url)
            .header("apikey", key.as_str())
            .header(AUTHORIZATION, format!("Bearer {key}"))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .with_context(|| format!("When fetching table {table}"))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .with_context(|| format!("When reading response for table {table}"))?;
        Inspection::from_response(status, &body)
    }

    /// 查询一张表，任何错误都收敛为 [`Inspection::Fault`]。
    pub async fn inspect_table(&self, table: &str) -> Inspection {
        let inspection = match self.query_table(table).await {
            Ok(inspection) => inspection,
            // `{:#}` 连同底层原因一并输出
            Err(e) => Inspection::Fault(format!("{e:#}")),
        };
        match &inspection {
            Inspection::Sample { count, .. } => debug!(table, count, "table sampled"),
            Inspection::Empty => debug!(table, "table empty or not readable"),
            Inspection::HttpError { status, .. } => debug!(table, status, "non-200 response"),
            Inspection::Fault(description) => debug!(table, %description, "table check failed"),
        }
        inspection
    }

    /// 检查一张表并把结果打印到标准输出。
    pub async fn check_table(&self, table: &str) -> Inspection {
        println!("{}", banner(table));
        let inspection = self.inspect_table(table).await;
        println!("{inspection}");
        inspection
    }
}
